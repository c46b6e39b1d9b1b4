use crate::{core::document::DocumentStore, error::ChunkviewError};
use std::{path::PathBuf, str::FromStr};
use tracing::debug;

/// Simple FS based implementation of a [DocumentStore].
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    /// The base directory to store the documents in.
    base: PathBuf,
}

impl FsDocumentStore {
    pub fn new(path: &str) -> Self {
        std::fs::create_dir_all(path).expect("unable to create storage directory");
        Self {
            base: PathBuf::from_str(path)
                .expect("invalid path")
                .canonicalize()
                .expect("unable to canonicalize"),
        }
    }
}

#[async_trait::async_trait]
impl DocumentStore for FsDocumentStore {
    fn id(&self) -> &'static str {
        "fs"
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, ChunkviewError> {
        debug!("Reading {path}");
        Ok(tokio::fs::read(path).await?)
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<String, ChunkviewError> {
        let path = format!("{}/{name}", self.base.display());
        debug!("Writing {path}");
        match tokio::fs::read(&path).await {
            Ok(_) => Err(ChunkviewError::AlreadyExists(name.to_string())),
            Err(e) => match e.kind() {
                std::io::ErrorKind::NotFound => {
                    tokio::fs::write(&path, content).await?;
                    Ok(path)
                }
                _ => Err(e.into()),
            },
        }
    }

    async fn delete(&self, path: &str) -> Result<(), ChunkviewError> {
        debug!("Removing {path}");
        Ok(tokio::fs::remove_file(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIR: &str = "__fs_doc_store_tests";
    const CONTENT: &[u8] = b"Hello world.";

    #[tokio::test]
    async fn works() {
        let store = FsDocumentStore::new(DIR);

        let path = store.write("foo.pdf", CONTENT).await.unwrap();

        let content = store.read(&path).await.unwrap();
        assert_eq!(CONTENT, content);

        // Double writes are rejected.
        assert!(matches!(
            store.write("foo.pdf", CONTENT).await,
            Err(ChunkviewError::AlreadyExists(_))
        ));

        store.delete(&path).await.unwrap();
        assert!(store.read(&path).await.is_err());

        tokio::fs::remove_dir_all(DIR).await.unwrap();
    }
}
