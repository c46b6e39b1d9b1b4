use crate::error::ChunkviewError;
use sha2::{Digest, Sha256};

/// Manipulates documents' content.
/// Serves as indirection to decouple the documents from their source.
#[async_trait::async_trait]
pub trait DocumentStore {
    fn id(&self) -> &'static str;

    /// Get the raw content of the document located on `path`.
    ///
    /// * `path`: The path to read from.
    async fn read(&self, path: &str) -> Result<Vec<u8>, ChunkviewError>;

    /// Write `content` to the storage implementation.
    /// Returns the absolute path of where the file was written.
    ///
    /// * `name`: Document name.
    /// * `content`: What to write.
    async fn write(&self, name: &str, content: &[u8]) -> Result<String, ChunkviewError>;

    /// Delete the document contents from the underlying storage.
    ///
    /// * `path`: The path to the document to delete.
    async fn delete(&self, path: &str) -> Result<(), ChunkviewError>;
}

pub fn sha256(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
