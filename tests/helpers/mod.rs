#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;

use bloodwork::application::ports::{
    AnalysisError, Analyzer, JobQueue, LlmClientError, QueueError, ResultBackend,
    ResultBackendError,
};
use bloodwork::application::services::{AnalysisWorker, SubmissionService, WorkerConfig};
use bloodwork::domain::{AnalysisQuery, Job, JobId, JobRecord, StoragePath};
use bloodwork::infrastructure::queue::{InMemoryJobQueue, InMemoryResultBackend};
use bloodwork::infrastructure::storage::ObjectBlobStore;
use bloodwork::presentation::{AppState, create_router};

pub const BOUNDARY: &str = "bloodwork-test-boundary";
pub const TEST_UPLOAD_LIMIT: usize = 1024 * 1024;
pub const STUB_ANALYSIS: &str = "Haemoglobin is within the normal range.";

pub enum Behaviour {
    Return(String),
    Fail,
    Panic,
}

/// Analyzer with a fixed outcome that counts how often it ran.
pub struct StubAnalyzer {
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl StubAnalyzer {
    pub fn returning(text: &str) -> Self {
        Self::with(Behaviour::Return(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::with(Behaviour::Fail)
    }

    pub fn panicking() -> Self {
        Self::with(Behaviour::Panic)
    }

    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Analyzer for StubAnalyzer {
    async fn analyze(
        &self,
        _query: &AnalysisQuery,
        _document: &StoragePath,
    ) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Return(text) => Ok(text.clone()),
            Behaviour::Fail => Err(AnalysisError::Llm(LlmClientError::ApiRequestFailed(
                "model unavailable".to_string(),
            ))),
            Behaviour::Panic => panic!("analyzer blew up"),
        }
    }
}

pub struct FailingQueue;

#[async_trait]
impl JobQueue for FailingQueue {
    async fn enqueue(&self, _job: &Job) -> Result<(), QueueError> {
        Err(QueueError::Unavailable("broker down".to_string()))
    }

    async fn dequeue(&self, _timeout: Duration) -> Result<Option<Job>, QueueError> {
        Ok(None)
    }

    async fn acknowledge(&self, _job_id: JobId) -> Result<(), QueueError> {
        Ok(())
    }

    async fn requeue(&self, _job: &Job) -> Result<(), QueueError> {
        Ok(())
    }

    async fn recover_in_flight(&self) -> Result<usize, QueueError> {
        Ok(0)
    }
}

pub struct FailingResultBackend;

#[async_trait]
impl ResultBackend for FailingResultBackend {
    async fn register(&self, _record: &JobRecord) -> Result<bool, ResultBackendError> {
        Err(ResultBackendError::ConnectionFailed("backend down".to_string()))
    }

    async fn transition(&self, _record: &JobRecord) -> Result<bool, ResultBackendError> {
        Err(ResultBackendError::ConnectionFailed("backend down".to_string()))
    }

    async fn get(&self, _job_id: JobId) -> Result<Option<JobRecord>, ResultBackendError> {
        Err(ResultBackendError::ConnectionFailed("backend down".to_string()))
    }

    async fn remove(&self, _job_id: JobId) -> Result<(), ResultBackendError> {
        Ok(())
    }
}

/// Fails a set number of lookups and transitions, then behaves like the
/// in-memory backend it wraps.
pub struct FlakyResultBackend {
    inner: Arc<InMemoryResultBackend>,
    failing_gets: AtomicUsize,
    failing_transitions: AtomicUsize,
}

impl FlakyResultBackend {
    pub fn new(inner: Arc<InMemoryResultBackend>) -> Self {
        Self {
            inner,
            failing_gets: AtomicUsize::new(0),
            failing_transitions: AtomicUsize::new(0),
        }
    }

    pub fn failing_gets(self, count: usize) -> Self {
        self.failing_gets.store(count, Ordering::SeqCst);
        self
    }

    pub fn failing_transitions(self, count: usize) -> Self {
        self.failing_transitions.store(count, Ordering::SeqCst);
        self
    }

    fn trip(counter: &AtomicUsize) -> Result<(), ResultBackendError> {
        match counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)) {
            Ok(_) => Err(ResultBackendError::ConnectionFailed("connection reset".to_string())),
            Err(_) => Ok(()),
        }
    }
}

#[async_trait]
impl ResultBackend for FlakyResultBackend {
    async fn register(&self, record: &JobRecord) -> Result<bool, ResultBackendError> {
        self.inner.register(record).await
    }

    async fn transition(&self, record: &JobRecord) -> Result<bool, ResultBackendError> {
        Self::trip(&self.failing_transitions)?;
        self.inner.transition(record).await
    }

    async fn get(&self, job_id: JobId) -> Result<Option<JobRecord>, ResultBackendError> {
        Self::trip(&self.failing_gets)?;
        self.inner.get(job_id).await
    }

    async fn remove(&self, job_id: JobId) -> Result<(), ResultBackendError> {
        self.inner.remove(job_id).await
    }
}

/// Everything a test needs to drive one submission through the system.
pub struct TestHarness {
    pub data_dir: tempfile::TempDir,
    pub blob_store: Arc<ObjectBlobStore>,
    pub queue: Arc<InMemoryJobQueue>,
    pub results: Arc<InMemoryResultBackend>,
    pub service: Arc<SubmissionService>,
}

impl TestHarness {
    pub fn new() -> Self {
        let data_dir = tempfile::TempDir::new().unwrap();
        let blob_store = Arc::new(ObjectBlobStore::local(data_dir.path().to_path_buf()).unwrap());
        let queue = Arc::new(InMemoryJobQueue::new(16));
        let results = Arc::new(InMemoryResultBackend::new());
        let service = Arc::new(SubmissionService::new(
            blob_store.clone(),
            queue.clone(),
            results.clone(),
        ));

        Self {
            data_dir,
            blob_store,
            queue,
            results,
            service,
        }
    }

    pub fn router(&self) -> axum::Router {
        self.router_with_limit(TEST_UPLOAD_LIMIT)
    }

    pub fn router_with_limit(&self, max_upload_size_bytes: usize) -> axum::Router {
        create_router(AppState {
            submission_service: Arc::clone(&self.service),
            max_upload_size_bytes,
        })
    }

    pub fn worker(&self, analyzer: Arc<dyn Analyzer>) -> AnalysisWorker {
        self.worker_with_config(analyzer, test_worker_config())
    }

    pub fn worker_with_config(
        &self,
        analyzer: Arc<dyn Analyzer>,
        config: WorkerConfig,
    ) -> AnalysisWorker {
        AnalysisWorker::new(
            self.queue.clone(),
            self.results.clone(),
            self.blob_store.clone(),
            analyzer,
            config,
        )
    }

    /// A worker that records outcomes through `results` instead of the
    /// harness backend. Polling through `service` still sees what lands in
    /// the harness backend.
    pub fn worker_with_results(
        &self,
        analyzer: Arc<dyn Analyzer>,
        results: Arc<dyn ResultBackend>,
        config: WorkerConfig,
    ) -> AnalysisWorker {
        AnalysisWorker::new(
            self.queue.clone(),
            results,
            self.blob_store.clone(),
            analyzer,
            config,
        )
    }

    /// Submits a report directly through the service and takes the job off
    /// the queue, the way a worker would.
    pub async fn submit_and_take(&self, query: Option<&str>) -> Job {
        self.service
            .submit(
                bytes::Bytes::from_static(b"Haemoglobin 14.1 g/dL"),
                "report.pdf".to_string(),
                query,
            )
            .await
            .unwrap();
        self.take_job().await
    }

    pub async fn take_job(&self) -> Job {
        self.queue
            .dequeue(Duration::from_millis(100))
            .await
            .unwrap()
            .expect("a job should be waiting")
    }

    pub fn stored_files(&self) -> usize {
        count_files(self.data_dir.path())
    }
}

pub fn test_worker_config() -> WorkerConfig {
    WorkerConfig {
        poll_timeout: Duration::from_millis(50),
        error_backoff: Duration::from_millis(10),
        record_attempts: 3,
        track_started: true,
    }
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.path().is_file())
                .count()
        })
        .unwrap_or(0)
}

/// Builds a `POST /analyze` request with the given form parts.
pub fn analyze_request(file: Option<(&str, &[u8])>, query: Option<&str>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(query) = query {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"query\"\r\n\r\n{query}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn results_request(task_id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/results/{task_id}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
