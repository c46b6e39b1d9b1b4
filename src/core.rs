//! The core module defines the business logic of chunkview.
//! It provides the traits and models upstream adapters need to implement.

pub mod chunk;
pub mod document;
pub mod export;
pub mod model;
pub mod parser;
pub mod service;
