use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{ResultBackend, ResultBackendError};
use crate::domain::{JobId, JobRecord};

/// Process-local result backend. Records live until the process exits.
#[derive(Default)]
pub struct InMemoryResultBackend {
    records: RwLock<HashMap<JobId, JobRecord>>,
}

impl InMemoryResultBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultBackend for InMemoryResultBackend {
    async fn register(&self, record: &JobRecord) -> Result<bool, ResultBackendError> {
        let mut records = self.records.write().await;
        match records.entry(record.job_id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(true)
            }
        }
    }

    async fn transition(&self, record: &JobRecord) -> Result<bool, ResultBackendError> {
        let mut records = self.records.write().await;
        if let Some(current) = records.get(&record.job_id) {
            if !current.status.can_transition_to(record.status) {
                return Ok(false);
            }
        }
        records.insert(record.job_id, record.clone());
        Ok(true)
    }

    async fn get(&self, job_id: JobId) -> Result<Option<JobRecord>, ResultBackendError> {
        Ok(self.records.read().await.get(&job_id).cloned())
    }

    async fn remove(&self, job_id: JobId) -> Result<(), ResultBackendError> {
        self.records.write().await.remove(&job_id);
        Ok(())
    }
}
