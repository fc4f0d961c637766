use super::document_id::DocumentId;
use super::storage_path::StoragePath;

/// A report received from a client, before it is staged.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    /// As sent by the client; only echoed back, never used as a path.
    pub filename: String,
    pub size_bytes: u64,
}

impl Document {
    pub fn new(filename: String, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            size_bytes,
        }
    }

    pub fn storage_path(&self) -> StoragePath {
        StoragePath::for_document(&self.id)
    }
}
