use async_trait::async_trait;

use crate::domain::{AnalysisQuery, StoragePath};

use super::{BlobStoreError, FileLoaderError, LlmClientError};

/// Turns a query and a staged report into analysis text.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(
        &self,
        query: &AnalysisQuery,
        document: &StoragePath,
    ) -> Result<String, AnalysisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("document unavailable: {0}")]
    Document(#[from] BlobStoreError),
    #[error("text extraction: {0}")]
    Extraction(#[from] FileLoaderError),
    #[error("llm: {0}")]
    Llm(#[from] LlmClientError),
    #[error("analysis produced no output")]
    EmptyResult,
    #[error("analyzer panicked: {0}")]
    Panicked(String),
}
