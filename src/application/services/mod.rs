mod analysis_worker;
mod report_analyzer;
mod submission_service;

pub use analysis_worker::{AnalysisWorker, AnalysisWorkerError, WorkerConfig};
pub use report_analyzer::{REPORT_PLACEHOLDER, ReportAnalyzer};
pub use submission_service::{
    JobView, StatusError, Submission, SubmissionError, SubmissionService,
};
