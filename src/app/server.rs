/// OpenAPI documentation.
pub mod api;

/// Http specific DTOs.
pub mod dto;

/// Route definitions and handlers.
pub mod router;

/// The bundled single page UI.
pub mod ui;
