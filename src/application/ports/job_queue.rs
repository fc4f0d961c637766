use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Job, JobId};

/// At-least-once delivery of submitted jobs to workers.
///
/// A dequeued job stays in flight until it is acknowledged; a consumer that
/// dies before acknowledging leaves it for [`JobQueue::recover_in_flight`].
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: &Job) -> Result<(), QueueError>;

    /// Waits up to `timeout` for the next job. `Ok(None)` means nothing arrived.
    async fn dequeue(&self, timeout: Duration) -> Result<Option<Job>, QueueError>;

    async fn acknowledge(&self, job_id: JobId) -> Result<(), QueueError>;

    /// Hands an unfinished delivery back to the queue for another attempt.
    async fn requeue(&self, job: &Job) -> Result<(), QueueError>;

    /// Puts unacknowledged jobs back on the queue and returns how many moved.
    async fn recover_in_flight(&self) -> Result<usize, QueueError>;
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("broker connection failed: {0}")]
    ConnectionFailed(String),
    #[error("broker operation failed: {0}")]
    Broker(String),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("queue unavailable: {0}")]
    Unavailable(String),
}
