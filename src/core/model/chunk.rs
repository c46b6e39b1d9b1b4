use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single unit of content extracted by the document analysis API.
/// Chunks are immutable once received and live for the duration of
/// one session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Chunk {
    /// Text content of the chunk. Holds the table markup for table chunks.
    pub text: String,

    /// The kind of content this chunk holds.
    pub chunk_type: ChunkType,

    /// Where the chunk is located in the source document.
    /// Empty when the analysis could not ground the chunk.
    #[serde(default)]
    pub grounding: Vec<Grounding>,
}

impl Chunk {
    /// The zero based page the chunk was extracted from, if known.
    pub fn page(&self) -> Option<u32> {
        self.grounding.first().map(|g| g.page)
    }

    /// The page label used when displaying the chunk. Pages display
    /// one based, chunks without grounding display as `N/A`.
    pub fn page_display(&self) -> String {
        match self.page() {
            Some(page) => (page + 1).to_string(),
            None => String::from("N/A"),
        }
    }
}

/// Chunk kinds returned by the analysis API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    Title,
    PageHeader,
    PageFooter,
    PageNumber,
    KeyValue,
    Text,
    Table,
    Figure,
    Marginalia,

    /// Tags introduced upstream must not break deserialization.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ChunkType::Title => "title",
            ChunkType::PageHeader => "page_header",
            ChunkType::PageFooter => "page_footer",
            ChunkType::PageNumber => "page_number",
            ChunkType::KeyValue => "key_value",
            ChunkType::Text => "text",
            ChunkType::Table => "table",
            ChunkType::Figure => "figure",
            ChunkType::Marginalia => "marginalia",
            ChunkType::Other => "other",
        };
        write!(f, "{tag}")
    }
}

/// Grounding metadata locating a chunk in the source document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Grounding {
    /// Zero based page index.
    pub page: u32,
}
