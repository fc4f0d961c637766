use std::time::Duration;

use async_trait::async_trait;

use crate::domain::StoragePath;

/// Pulls plain text out of a staged report's bytes.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        source: &StoragePath,
    ) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
    #[error("extraction timed out after {0:?}")]
    Timeout(Duration),
}
