use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    BlobStore, BlobStoreError, JobQueue, QueueError, ResultBackend, ResultBackendError,
};
use crate::domain::{AnalysisQuery, Document, Job, JobId, JobRecord, JobStatus, StoragePath};

/// The API side of the job contract: stage the upload, register and enqueue
/// the job, and answer status polls from the result backend.
pub struct SubmissionService {
    blob_store: Arc<dyn BlobStore>,
    queue: Arc<dyn JobQueue>,
    results: Arc<dyn ResultBackend>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub job_id: JobId,
    pub filename: String,
    pub query: AnalysisQuery,
}

/// What a status poll observed.
#[derive(Debug, Clone, PartialEq)]
pub enum JobView {
    Pending { started: bool },
    Completed { analysis: String },
    Failed { error: String },
    NotFound,
}

impl SubmissionService {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        queue: Arc<dyn JobQueue>,
        results: Arc<dyn ResultBackend>,
    ) -> Self {
        Self {
            blob_store,
            queue,
            results,
        }
    }

    /// Stages `data` and hands a new job to the queue.
    ///
    /// On any failure the staged document (and the pending record, if one
    /// was written) is removed before the error is returned. Once `enqueue`
    /// succeeds the document belongs to whichever worker takes the job.
    #[tracing::instrument(skip(self, data, query), fields(bytes = data.len()))]
    pub async fn submit(
        &self,
        data: Bytes,
        filename: String,
        query: Option<&str>,
    ) -> Result<Submission, SubmissionError> {
        let query = AnalysisQuery::from_form(query);
        let document = Document::new(filename, data.len() as u64);
        let path = document.storage_path();

        let stream = Box::pin(futures::stream::once(async move {
            Ok::<_, std::io::Error>(data)
        }));
        match self.blob_store.store(&path, stream).await {
            Ok(stored) => tracing::debug!(
                document_id = %document.id,
                expected = document.size_bytes,
                stored,
                "Report staged"
            ),
            Err(e) => {
                self.discard_document(&path).await;
                return Err(SubmissionError::Storage(e));
            }
        }

        let job = Job::new(query, path, document.filename);

        match self.results.register(&JobRecord::pending(job.id)).await {
            Ok(true) => {}
            Ok(false) => {
                self.discard_document(&job.document).await;
                return Err(SubmissionError::DuplicateJob(job.id));
            }
            Err(e) => {
                self.discard_document(&job.document).await;
                return Err(SubmissionError::Registration(e));
            }
        }

        if let Err(e) = self.queue.enqueue(&job).await {
            self.discard_document(&job.document).await;
            if let Err(remove_err) = self.results.remove(job.id).await {
                tracing::warn!(
                    error = %remove_err,
                    job_id = %job.id,
                    "Failed to remove pending record after enqueue failure"
                );
            }
            return Err(SubmissionError::Enqueue(e));
        }

        tracing::info!(job_id = %job.id, path = %job.document, "Analysis job enqueued");

        Ok(Submission {
            job_id: job.id,
            filename: job.filename,
            query: job.query,
        })
    }

    /// Reads the job's current record. Never waits and never writes.
    pub async fn status(&self, job_id: JobId) -> Result<JobView, StatusError> {
        let record = match self.results.get(job_id).await? {
            Some(record) => record,
            None => return Ok(JobView::NotFound),
        };

        Ok(match record.status {
            JobStatus::Pending => JobView::Pending { started: false },
            JobStatus::Started => JobView::Pending { started: true },
            JobStatus::Succeeded => JobView::Completed {
                analysis: record.result.unwrap_or_default(),
            },
            JobStatus::Failed => JobView::Failed {
                error: record
                    .error
                    .unwrap_or_else(|| "analysis failed without a reported cause".to_string()),
            },
        })
    }

    async fn discard_document(&self, path: &StoragePath) {
        match self.blob_store.delete(path).await {
            Ok(()) | Err(BlobStoreError::NotFound(_)) => {}
            Err(e) => {
                tracing::error!(error = %e, path = %path, "Failed to remove staged document");
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("staging document: {0}")]
    Storage(BlobStoreError),
    #[error("registering job: {0}")]
    Registration(ResultBackendError),
    #[error("job {0} already registered")]
    DuplicateJob(JobId),
    #[error("enqueueing job: {0}")]
    Enqueue(QueueError),
}

#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("result backend: {0}")]
    Backend(#[from] ResultBackendError),
}
