//! Http specific DTOs.

use crate::core::model::{chunk::Chunk, document::Document};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub documents: Vec<Document>,
    /// Map form keys to errors
    pub errors: HashMap<String, Vec<String>>,
}

/// One chunk prepared for display.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChunkPreview {
    /// One based position of the chunk in the parse output.
    pub ordinal: usize,

    /// One based page label, `N/A` when the chunk has no grounding.
    pub page: String,

    /// The chunk type tag.
    pub chunk_type: String,

    pub text: String,
}

impl ChunkPreview {
    pub fn new(ordinal: usize, chunk: &Chunk) -> Self {
        Self {
            ordinal,
            page: chunk.page_display(),
            chunk_type: chunk.chunk_type.to_string(),
            text: chunk.text.clone(),
        }
    }
}

/// The merged content of a single source page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageText {
    /// One based page number.
    pub page: u32,

    pub text: String,
}
