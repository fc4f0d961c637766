use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::application::ports::{
    AnalysisError, Analyzer, BlobStore, BlobStoreError, JobQueue, QueueError, ResultBackend,
    ResultBackendError,
};
use crate::domain::{Job, JobRecord, JobStatus, StoragePath};

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// How long one dequeue call waits before checking for shutdown again.
    pub poll_timeout: Duration,
    /// Pause after a broker or backend error before trying again.
    pub error_backoff: Duration,
    /// Attempts at writing the outcome of a finished analysis.
    pub record_attempts: u32,
    /// Write STARTED when a job is picked up.
    pub track_started: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(5),
            error_backoff: Duration::from_secs(1),
            record_attempts: 5,
            track_started: true,
        }
    }
}

/// Consumes jobs, runs the analyzer, cleans up the staged document and
/// records the outcome.
pub struct AnalysisWorker {
    queue: Arc<dyn JobQueue>,
    results: Arc<dyn ResultBackend>,
    blob_store: Arc<dyn BlobStore>,
    analyzer: Arc<dyn Analyzer>,
    config: WorkerConfig,
}

impl AnalysisWorker {
    pub fn new(
        queue: Arc<dyn JobQueue>,
        results: Arc<dyn ResultBackend>,
        blob_store: Arc<dyn BlobStore>,
        analyzer: Arc<dyn Analyzer>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            queue,
            results,
            blob_store,
            analyzer,
            config,
        }
    }

    /// Starts `concurrency` consumer loops that stop once `shutdown` flips to
    /// `true` (or its sender is dropped). A loop notices shutdown between
    /// polls, so stopping takes up to `poll_timeout`.
    pub fn spawn_pool(
        self: Arc<Self>,
        concurrency: usize,
        shutdown: watch::Receiver<bool>,
    ) -> JoinSet<()> {
        let mut pool = JoinSet::new();
        for index in 0..concurrency.max(1) {
            let worker = Arc::clone(&self);
            let shutdown = shutdown.clone();
            pool.spawn(async move { worker.run(index, shutdown).await });
        }
        pool
    }

    pub async fn run(&self, index: usize, shutdown: watch::Receiver<bool>) {
        tracing::info!(worker = index, "Analysis worker started");
        // The dequeue is never raced against shutdown: dropping it midway can
        // lose a job the broker has already moved to the in-flight list.
        while !is_stopping(&shutdown) {
            let job = match self.queue.dequeue(self.config.poll_timeout).await {
                Ok(Some(job)) => job,
                Ok(None) => continue,
                Err(e) => {
                    tracing::error!(worker = index, error = %e, "Failed to dequeue job");
                    tokio::time::sleep(self.config.error_backoff).await;
                    continue;
                }
            };

            let span = tracing::info_span!(
                "analysis_job",
                worker = index,
                job_id = %job.id,
                path = %job.document,
            );
            if let Err(e) = self.process_job(job.clone()).instrument(span.clone()).await {
                tracing::error!(worker = index, error = %e, "Job processing interrupted");
                self.release(&job).instrument(span).await;
                tokio::time::sleep(self.config.error_backoff).await;
            }
        }
        tracing::info!(worker = index, "Analysis worker stopped");
    }

    /// Runs one job to a terminal state and returns that state.
    ///
    /// Analyzer failures (including panics) become FAILED records; only
    /// queue and result-backend errors are returned as `Err`, and the job is
    /// then still in flight for the caller to requeue.
    pub async fn process_job(&self, job: Job) -> Result<JobStatus, AnalysisWorkerError> {
        if let Some(existing) = self.results.get(job.id).await? {
            if existing.status.is_terminal() {
                tracing::info!(status = %existing.status, "Redelivered job already finished");
                self.remove_document(&job.document).await;
                self.queue.acknowledge(job.id).await?;
                return Ok(existing.status);
            }
        }

        if self.config.track_started {
            self.results.transition(&JobRecord::started(job.id)).await?;
            tracing::debug!(status = %JobStatus::Started, "Job status transition");
        }

        let outcome = self.run_analysis(&job).await;

        self.remove_document(&job.document).await;

        let record = match outcome {
            Ok(analysis) => {
                tracing::info!(chars = analysis.chars().count(), "Analysis completed");
                JobRecord::succeeded(job.id, analysis)
            }
            Err(e) => {
                tracing::error!(error = %e, "Analysis failed");
                JobRecord::failed(job.id, e.to_string())
            }
        };
        let status = record.status;

        self.record_outcome(&record).await?;
        self.queue.acknowledge(job.id).await?;

        Ok(status)
    }

    /// Retries backend errors up to `record_attempts` times. The document is
    /// already deleted here, so a redelivery could not repeat the analysis.
    async fn record_outcome(&self, record: &JobRecord) -> Result<(), ResultBackendError> {
        let mut attempt = 1;
        loop {
            match self.results.transition(record).await {
                Ok(true) => return Ok(()),
                Ok(false) => {
                    tracing::warn!(
                        status = %record.status,
                        "Job already has a terminal record; outcome dropped"
                    );
                    return Ok(());
                }
                Err(e) if attempt < self.config.record_attempts => {
                    tracing::warn!(attempt, error = %e, "Failed to record job outcome; retrying");
                    attempt += 1;
                    tokio::time::sleep(self.config.error_backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Puts an interrupted job back on the queue. Its document is kept, since
    /// the next delivery needs it.
    async fn release(&self, job: &Job) {
        match self.queue.requeue(job).await {
            Ok(()) => tracing::info!("Job requeued"),
            Err(e) => tracing::error!(error = %e, "Failed to requeue job; left in flight"),
        }
    }

    async fn run_analysis(&self, job: &Job) -> Result<String, AnalysisError> {
        let analysis = AssertUnwindSafe(self.analyzer.analyze(&job.query, &job.document))
            .catch_unwind()
            .await;

        match analysis {
            Ok(Ok(text)) if text.trim().is_empty() => Err(AnalysisError::EmptyResult),
            Ok(result) => result,
            Err(panic) => Err(AnalysisError::Panicked(panic_message(panic.as_ref()))),
        }
    }

    async fn remove_document(&self, path: &StoragePath) {
        match self.blob_store.delete(path).await {
            Ok(()) => tracing::debug!("Staged document removed"),
            Err(BlobStoreError::NotFound(_)) => {
                tracing::debug!("Staged document already removed");
            }
            Err(e) => tracing::warn!(error = %e, "Failed to remove staged document"),
        }
    }
}

fn is_stopping(shutdown: &watch::Receiver<bool>) -> bool {
    shutdown.has_changed().is_err() || *shutdown.borrow()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisWorkerError {
    #[error("queue: {0}")]
    Queue(#[from] QueueError),
    #[error("result backend: {0}")]
    Results(#[from] ResultBackendError),
}
