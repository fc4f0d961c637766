use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{JobId, JobStatus};

/// What the result backend holds for a job.
///
/// `result` is only set for [`JobStatus::Succeeded`] and `error` only for
/// [`JobStatus::Failed`]; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: JobId,
    pub status: JobStatus,
    pub result: Option<String>,
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    pub fn pending(job_id: JobId) -> Self {
        Self::with_status(job_id, JobStatus::Pending)
    }

    pub fn started(job_id: JobId) -> Self {
        Self::with_status(job_id, JobStatus::Started)
    }

    pub fn succeeded(job_id: JobId, result: String) -> Self {
        Self {
            result: Some(result),
            ..Self::with_status(job_id, JobStatus::Succeeded)
        }
    }

    pub fn failed(job_id: JobId, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::with_status(job_id, JobStatus::Failed)
        }
    }

    fn with_status(job_id: JobId, status: JobStatus) -> Self {
        Self {
            job_id,
            status,
            result: None,
            error: None,
            updated_at: Utc::now(),
        }
    }
}
