use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnalysisQuery, JobId, StoragePath};

/// One unit of submitted analysis work. This is the queue payload; it never
/// changes after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub query: AnalysisQuery,
    pub document: StoragePath,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(query: AnalysisQuery, document: StoragePath, filename: String) -> Self {
        Self {
            id: JobId::new(),
            query,
            document,
            filename,
            created_at: Utc::now(),
        }
    }
}
