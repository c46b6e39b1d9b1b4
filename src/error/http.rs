use super::ChunkviewError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

impl ChunkviewError {
    pub fn status(&self) -> StatusCode {
        use ChunkviewError as E;
        use StatusCode as SC;
        match self {
            E::AlreadyExists(_) => SC::CONFLICT,
            E::DoesNotExist(_) => SC::NOT_FOUND,
            E::InvalidFileName(_) | E::UnsupportedFileType(_) => SC::UNPROCESSABLE_ENTITY,
            E::Analysis(_) => SC::BAD_GATEWAY,
            E::IO(_) | E::SerdeJson(_) | E::Render(_) | E::Http(_) | E::Axum(_) => {
                SC::INTERNAL_SERVER_ERROR
            }
            E::Reqwest(e) => e.status().unwrap_or(SC::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Error response wrapper.
#[derive(Debug, Serialize)]
struct ResponseError<T: Serialize> {
    error_type: ErrorType,
    body: T,
}

impl<T> ResponseError<T>
where
    T: Serialize,
{
    pub fn new(error_type: ErrorType, body: T) -> Self {
        Self { error_type, body }
    }
}

#[derive(Debug, Serialize)]
enum ErrorType {
    Internal,
    Api,
}

impl<T> IntoResponse for ResponseError<T>
where
    T: Serialize,
{
    fn into_response(self) -> axum::response::Response {
        <Json<ResponseError<T>> as IntoResponse>::into_response(Json(self))
    }
}

impl IntoResponse for ChunkviewError {
    fn into_response(self) -> axum::response::Response {
        error!("{self}");

        let status = self.status();

        use ChunkviewError as CE;
        use ErrorType as ET;

        match self {
            CE::DoesNotExist(e) => (status, ResponseError::new(ET::Api, e)).into_response(),
            CE::AlreadyExists(e) => (status, ResponseError::new(ET::Api, e)).into_response(),
            CE::InvalidFileName(e) | CE::UnsupportedFileType(e) => {
                (status, ResponseError::new(ET::Api, e)).into_response()
            }

            // The parse failure taxonomy is deliberately flat, the user
            // gets a single message for any upstream failure.
            CE::Analysis(e) => (status, ResponseError::new(ET::Api, e)).into_response(),
            CE::Reqwest(e) => {
                (status, ResponseError::new(ET::Internal, e.to_string())).into_response()
            }

            CE::IO(_) | CE::SerdeJson(_) | CE::Render(_) | CE::Http(_) | CE::Axum(_) => {
                (status, ResponseError::new(ET::Internal, self.to_string())).into_response()
            }
        }
    }
}
