mod analyzer;
mod blob_store;
mod file_loader;
mod job_queue;
mod llm_client;
mod result_backend;

pub use analyzer::{AnalysisError, Analyzer};
pub use blob_store::{BlobStore, BlobStoreError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use job_queue::{JobQueue, QueueError};
pub use llm_client::{LlmClient, LlmClientError};
pub use result_backend::{ResultBackend, ResultBackendError};
