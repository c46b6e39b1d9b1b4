#[rustfmt::skip]
use super::router::{
    __path_health_check,
    // Documents
    __path_upload_documents,
    __path_get_document,
    __path_delete_document,
    __path_parse_document,
    __path_document_pages,
    __path_export_document,
};
use super::dto::{ChunkPreview, PageText, UploadResult};
use crate::core::model::{
    chunk::{Chunk, ChunkType, Grounding},
    document::Document,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        // Documents
        upload_documents,
        get_document,
        delete_document,
        parse_document,
        document_pages,
        export_document,
    ),
    components(schemas(
        Document,
        Chunk,
        ChunkType,
        Grounding,
        ChunkPreview,
        PageText,
        UploadResult,
    ))
)]
pub struct ApiDoc;
