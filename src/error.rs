use thiserror::Error;

pub mod http;

#[derive(Debug, Error)]
pub enum ChunkviewError {
    #[error("Does not exist; {0}")]
    DoesNotExist(String),

    #[error("Invalid file name; {0}")]
    InvalidFileName(String),

    #[error("Entity already exists; {0}")]
    AlreadyExists(String),

    #[error("Unsupported file type; {0}")]
    UnsupportedFileType(String),

    #[error("IO; {0}")]
    IO(#[from] std::io::Error),

    #[error("JSON error; {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Document analysis; {0}")]
    Analysis(String),

    #[error("Pdf render; {0}")]
    Render(#[from] printpdf::Error),

    #[error("Http; {0}")]
    Http(#[from] axum::http::Error),

    #[error("Axum; {0}")]
    Axum(#[from] axum::Error),

    #[error("Reqwest; {0}")]
    Reqwest(#[from] reqwest::Error),
}
