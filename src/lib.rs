/// Concrete implementations of the [core] module.
pub mod app;

/// Application starting arguments and configuration.
pub mod config;

/// Core business logic.
pub mod core;

/// Error types.
pub mod error;

/// The file name of the document produced by the export endpoint.
pub const EXPORT_FILE_NAME: &str = "parsed_chunks.pdf";
