mod analysis_query;
mod document;
mod document_id;
mod job;
mod job_id;
mod job_record;
mod job_status;
mod report_format;
mod storage_path;

pub use analysis_query::{AnalysisQuery, DEFAULT_QUERY};
pub use document::Document;
pub use document_id::DocumentId;
pub use job::Job;
pub use job_id::JobId;
pub use job_record::JobRecord;
pub use job_status::JobStatus;
pub use report_format::ReportFormat;
pub use storage_path::StoragePath;
