//! Module containing concrete implementations from the [core](crate::core) module.

/// Document storage implementations.
pub mod document;

/// Document analysis client implementations.
pub mod parser;

/// HTTP server implementation.
pub mod server;

/// Application state configuration.
pub mod state;
