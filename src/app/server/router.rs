use super::{
    api::ApiDoc,
    dto::{ChunkPreview, PageText, UploadResult},
    ui,
};
use crate::{
    app::state::AppState,
    core::model::document::{Document, DocumentType},
    error::ChunkviewError,
};
use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{delete, get, post},
    Json, Router,
};
use std::{collections::HashMap, str::FromStr, time::Duration};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

pub fn router(state: AppState, origins: Vec<String>, headers: Vec<String>) -> Router {
    let origins = origins
        .into_iter()
        .map(|origin| {
            tracing::debug!("Adding {origin} to allowed origins");
            HeaderValue::from_str(&origin)
        })
        .map(Result::unwrap);

    let headers: Vec<HeaderName> = headers
        .into_iter()
        .map(|header| {
            tracing::debug!("Adding {header} to allowed headers");
            HeaderName::from_str(&header)
        })
        .map(Result::unwrap)
        .collect();

    // An empty list allows any header.
    let headers = if headers.is_empty() {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(headers)
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::list(origins))
        .allow_headers(headers)
        .allow_methods([Method::GET, Method::POST, Method::DELETE]);

    service_api(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http().on_failure(
            |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                tracing::error!("{error}")
            },
        ))
        .layer(cors)
}

fn service_api(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/_health", get(health_check))
        .route("/documents", post(upload_documents))
        .layer(DefaultBodyLimit::max(50_000_000))
        .route("/documents/:id", get(get_document))
        .route("/documents/:id", delete(delete_document))
        .route("/documents/:id/parse", post(parse_document))
        .route("/documents/:id/pages", get(document_pages))
        .route("/documents/:id/export", get(export_document))
        .with_state(state)
}

async fn index() -> impl IntoResponse {
    Html(ui::INDEX_HTML)
}

#[utoipa::path(
    get,
    path = "/_health",
    responses(
        (status = 200, description = "Health check", body = String)
    )
)]
pub(super) async fn health_check() -> impl IntoResponse {
    "OK"
}

#[utoipa::path(
    post,
    path = "/documents",
    responses(
        (status = 200, description = "Upload documents", body = UploadResult),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    ),
    request_body = axum::extract::Multipart
)]
pub(super) async fn upload_documents(
    state: State<AppState>,
    mut form: axum::extract::Multipart,
) -> Result<Json<UploadResult>, ChunkviewError> {
    let mut documents = vec![];
    let mut errors = HashMap::<String, Vec<String>>::new();

    while let Ok(Some(field)) = form.next_field().await {
        let Some(name) = field.file_name() else {
            continue;
        };

        let name = name.to_string();

        let file = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("error in form: {e}");
                errors
                    .entry(name)
                    .and_modify(|entry| entry.push(e.to_string()))
                    .or_insert_with(|| vec![e.to_string()]);
                continue;
            }
        };

        let ty = match DocumentType::try_from_file_name(&name) {
            Ok(ty) => ty,
            Err(e) => {
                tracing::error!("{e}");
                errors
                    .entry(name)
                    .and_modify(|entry| entry.push(e.to_string()))
                    .or_insert_with(|| vec![e.to_string()]);
                continue;
            }
        };

        let document = match state.documents.upload(&name, ty, &file).await {
            Ok(document) => document,
            // A name collision fails that file, not the whole batch.
            Err(e @ ChunkviewError::AlreadyExists(_)) => {
                tracing::error!("{e}");
                errors
                    .entry(name)
                    .and_modify(|entry| entry.push(e.to_string()))
                    .or_insert_with(|| vec![e.to_string()]);
                continue;
            }
            Err(e) => return Err(e),
        };

        documents.push(document);
    }

    Ok(Json(UploadResult { documents, errors }))
}

#[utoipa::path(
    get,
    path = "/documents/{id}",
    responses(
        (status = 200, description = "Get document by id", body = Document),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "Document ID")
    )
)]
pub(super) async fn get_document(
    state: State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, ChunkviewError> {
    let document = state.documents.get_metadata(id).await?;
    Ok(Json(document))
}

#[utoipa::path(
    delete,
    path = "/documents/{id}",
    responses(
        (status = 204, description = "Delete document by id"),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "Document ID")
    )
)]
pub(super) async fn delete_document(
    state: State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ChunkviewError> {
    state.documents.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/documents/{id}/parse",
    responses(
        (status = 200, description = "Parse the document into chunks", body = Vec<ChunkPreview>),
        (status = 404, description = "Document not found"),
        (status = 502, description = "Document analysis failed"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "Document ID")
    )
)]
pub(super) async fn parse_document(
    state: State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChunkPreview>>, ChunkviewError> {
    let chunks = state.documents.parse(id).await?;

    let previews = chunks
        .iter()
        .enumerate()
        .map(|(idx, chunk)| ChunkPreview::new(idx + 1, chunk))
        .collect();

    Ok(Json(previews))
}

#[utoipa::path(
    get,
    path = "/documents/{id}/pages",
    responses(
        (status = 200, description = "Parsed content grouped by page", body = Vec<PageText>),
        (status = 404, description = "Document not found or not parsed"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "Document ID")
    )
)]
pub(super) async fn document_pages(
    state: State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PageText>>, ChunkviewError> {
    let pages = state.documents.pages(id).await?;

    let pages = pages
        .into_iter()
        .map(|(page, text)| PageText {
            page: page + 1,
            text,
        })
        .collect();

    Ok(Json(pages))
}

#[utoipa::path(
    get,
    path = "/documents/{id}/export",
    responses(
        (status = 200, description = "Parsed chunks re-rendered as a PDF file"),
        (status = 404, description = "Document not found or not parsed"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "Document ID")
    )
)]
pub(super) async fn export_document(
    state: State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ChunkviewError> {
    let file = state.documents.export(id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, String::from("application/pdf")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", crate::EXPORT_FILE_NAME),
            ),
        ],
        file,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::document::store::FsDocumentStore,
        core::{
            export::{FontConfig, PdfExporter},
            model::chunk::Chunk,
            parser::ChunkParser,
            service::document::DocumentService,
        },
    };
    use axum::body::Body;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubParser;

    #[async_trait::async_trait]
    impl ChunkParser for StubParser {
        fn id(&self) -> &'static str {
            "stub"
        }

        async fn parse(&self, _: &str, _: &[u8]) -> Result<Vec<Chunk>, ChunkviewError> {
            Ok(vec![])
        }
    }

    fn app(dir: &str) -> Router {
        let store = FsDocumentStore::new(dir);
        let exporter = PdfExporter::new(FontConfig::Builtin).unwrap();
        let documents = DocumentService::new(store, Arc::new(StubParser), Arc::new(exporter));
        service_api(AppState { documents })
    }

    fn upload_request(boundary: &str, files: &[(&str, &str)]) -> axum::http::Request<Body> {
        let mut body = String::new();
        for (name, content) in files {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/pdf\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        axum::http::Request::builder()
            .method(Method::POST)
            .uri("/documents")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn duplicate_upload_fails_per_file_not_whole_batch() {
        const DIR: &str = "__router_upload_tests";

        let app = app(DIR);
        let request = upload_request(
            "chunkviewbound",
            &[("dup.pdf", "%PDF-1.4 one"), ("dup.pdf", "%PDF-1.4 two")],
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(StatusCode::OK, response.status());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(1, result["documents"].as_array().unwrap().len());
        assert_eq!(1, result["errors"]["dup.pdf"].as_array().unwrap().len());

        tokio::fs::remove_dir_all(DIR).await.unwrap();
    }
}
