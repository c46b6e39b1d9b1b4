use crate::{
    core::{
        chunk,
        document::{sha256, DocumentStore},
        export::PdfExporter,
        model::{
            chunk::Chunk,
            document::{Document, DocumentType},
        },
        parser::ChunkParser,
    },
    error::ChunkviewError,
};
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// High level operations for document management.
///
/// Uploads and parse results are session scoped. They live in memory
/// for the lifetime of the process and have no cross session visibility.
#[derive(Clone)]
pub struct DocumentService<S> {
    storage: S,
    parser: Arc<dyn ChunkParser + Send + Sync>,
    exporter: Arc<PdfExporter>,
    sessions: Arc<RwLock<Sessions>>,
}

#[derive(Default)]
struct Sessions {
    documents: HashMap<Uuid, Document>,
    chunks: HashMap<Uuid, Vec<Chunk>>,
}

impl<S> DocumentService<S>
where
    S: DocumentStore,
{
    pub fn new(
        storage: S,
        parser: Arc<dyn ChunkParser + Send + Sync>,
        exporter: Arc<PdfExporter>,
    ) -> Self {
        Self {
            storage,
            parser,
            exporter,
            sessions: Arc::new(RwLock::new(Sessions::default())),
        }
    }

    /// Get the metadata for a document.
    ///
    /// * `id`: The ID of the document.
    pub async fn get_metadata(&self, id: Uuid) -> Result<Document, ChunkviewError> {
        let sessions = self.sessions.read().await;

        let Some(document) = sessions.documents.get(&id) else {
            return Err(ChunkviewError::DoesNotExist(format!("Document with ID {id}")));
        };

        Ok(document.clone())
    }

    /// Persist an uploaded file in the underlying storage implementation
    /// and keep its metadata for the session.
    ///
    /// * `name`: Document name.
    /// * `ty`: Document type.
    /// * `file`: Document file.
    pub async fn upload(
        &self,
        name: &str,
        ty: DocumentType,
        file: &[u8],
    ) -> Result<Document, ChunkviewError> {
        debug!("Storing '{name}' with provider '{}'", self.storage.id());

        let path = self.storage.write(name, file).await?;
        let document = Document::new(name, &path, ty, &sha256(file));

        self.sessions
            .write()
            .await
            .documents
            .insert(document.id, document.clone());

        Ok(document)
    }

    /// Send the stored file to the analysis service and keep the
    /// resulting chunk sequence for the session, replacing any previous
    /// parse of the same document.
    ///
    /// * `id`: The ID of the document to parse.
    pub async fn parse(&self, id: Uuid) -> Result<Vec<Chunk>, ChunkviewError> {
        let document = self.get_metadata(id).await?;
        let file = self.storage.read(&document.path).await?;

        let chunks = self.parser.parse(&document.name, &file).await?;

        debug!(
            "Parsed '{}' into {} chunk(s) with parser '{}'",
            document.name,
            chunks.len(),
            self.parser.id()
        );

        self.sessions.write().await.chunks.insert(id, chunks.clone());

        Ok(chunks)
    }

    /// The merged content of each page of a parsed document, in
    /// ascending page order. The document must be parsed first.
    ///
    /// * `id`: The ID of the document.
    pub async fn pages(&self, id: Uuid) -> Result<BTreeMap<u32, String>, ChunkviewError> {
        let sessions = self.sessions.read().await;

        let Some(chunks) = sessions.chunks.get(&id) else {
            return Err(ChunkviewError::DoesNotExist(format!(
                "Parse results for document {id}"
            )));
        };

        Ok(chunk::group_by_page(chunks))
    }

    /// Re-render the parsed chunks of a document into a complete PDF
    /// file. The document must be parsed first.
    ///
    /// * `id`: The ID of the document.
    pub async fn export(&self, id: Uuid) -> Result<Vec<u8>, ChunkviewError> {
        let sessions = self.sessions.read().await;

        let Some(chunks) = sessions.chunks.get(&id) else {
            return Err(ChunkviewError::DoesNotExist(format!(
                "Parse results for document {id}"
            )));
        };

        self.exporter.render(chunks)
    }

    /// Remove the document from storage along with its session data.
    ///
    /// * `id`: The ID of the document.
    pub async fn delete(&self, id: Uuid) -> Result<(), ChunkviewError> {
        let document = self.get_metadata(id).await?;

        self.storage.delete(&document.path).await?;

        let mut sessions = self.sessions.write().await;
        sessions.documents.remove(&id);
        sessions.chunks.remove(&id);

        Ok(())
    }
}
