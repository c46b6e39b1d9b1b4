use crate::error::ChunkviewError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Holds upload metadata. Kept in memory for the duration of the session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Document {
    pub id: uuid::Uuid,

    /// File name.
    pub name: String,

    /// Absolute path to file.
    pub path: String,

    /// File extension.
    pub ext: String,

    /// Content hash.
    pub hash: String,

    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: &str, path: &str, ext: DocumentType, hash: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            path: path.to_string(),
            ext: ext.to_string(),
            hash: hash.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// All file types chunkview accepts for upload.
#[derive(Debug, Clone, Copy)]
pub enum DocumentType {
    /// PDF document.
    Pdf,
}

impl DocumentType {
    pub fn try_from_file_name(name: &str) -> Result<Self, ChunkviewError> {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Err(ChunkviewError::UnsupportedFileType(format!(
                "{name} - missing extension"
            )));
        };
        Self::try_from(ext)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Pdf => write!(f, "pdf"),
        }
    }
}

impl TryFrom<&str> for DocumentType {
    type Error = ChunkviewError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pdf" => Ok(Self::Pdf),
            _ => Err(ChunkviewError::UnsupportedFileType(value.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_from_file_name() {
        assert!(DocumentType::try_from_file_name("report.pdf").is_ok());
        assert!(DocumentType::try_from_file_name("report.docx").is_err());
        assert!(DocumentType::try_from_file_name("report").is_err());
    }
}
