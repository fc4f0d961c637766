use async_trait::async_trait;

use crate::domain::{JobId, JobRecord};

/// Job id → latest [`JobRecord`], written by workers and read by the API.
#[async_trait]
pub trait ResultBackend: Send + Sync {
    /// Writes the initial record unless one already exists for this job.
    /// Returns whether the record was written.
    async fn register(&self, record: &JobRecord) -> Result<bool, ResultBackendError>;

    /// Overwrites the record unless the stored one is terminal or the
    /// transition is not allowed. Returns whether the record was written.
    async fn transition(&self, record: &JobRecord) -> Result<bool, ResultBackendError>;

    async fn get(&self, job_id: JobId) -> Result<Option<JobRecord>, ResultBackendError>;

    async fn remove(&self, job_id: JobId) -> Result<(), ResultBackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResultBackendError {
    #[error("backend connection failed: {0}")]
    ConnectionFailed(String),
    #[error("backend operation failed: {0}")]
    Backend(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}
