use crate::{core::model::chunk::Chunk, error::ChunkviewError};

/// Implemented by clients of external document analysis services.
#[async_trait::async_trait]
pub trait ChunkParser {
    fn id(&self) -> &'static str;

    /// Analyse a document and return its content as an ordered sequence
    /// of chunks.
    ///
    /// * `name`: Document file name, forwarded to the analysis service.
    /// * `file`: Document bytes.
    async fn parse(&self, name: &str, file: &[u8]) -> Result<Vec<Chunk>, ChunkviewError>;
}
