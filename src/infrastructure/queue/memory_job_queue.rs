use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::application::ports::{JobQueue, QueueError};
use crate::domain::{Job, JobId};

/// Bounded in-process queue for single-process deployments and tests.
pub struct InMemoryJobQueue {
    sender: mpsc::Sender<Job>,
    receiver: Mutex<mpsc::Receiver<Job>>,
    in_flight: Mutex<HashMap<JobId, Job>>,
}

impl InMemoryJobQueue {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            sender,
            receiver: Mutex::new(receiver),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn in_flight_len(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    fn offer(&self, job: Job) -> Result<(), QueueError> {
        self.sender.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                QueueError::Unavailable("queue is full".to_string())
            }
            mpsc::error::TrySendError::Closed(_) => {
                QueueError::Unavailable("queue is closed".to_string())
            }
        })
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job: &Job) -> Result<(), QueueError> {
        self.offer(job.clone())
    }

    async fn dequeue(&self, timeout: Duration) -> Result<Option<Job>, QueueError> {
        let received = tokio::time::timeout(timeout, async {
            let mut receiver = self.receiver.lock().await;
            receiver.recv().await
        })
        .await;

        match received {
            Ok(Some(job)) => {
                self.in_flight.lock().await.insert(job.id, job.clone());
                Ok(Some(job))
            }
            Ok(None) | Err(_) => Ok(None),
        }
    }

    async fn acknowledge(&self, job_id: JobId) -> Result<(), QueueError> {
        self.in_flight.lock().await.remove(&job_id);
        Ok(())
    }

    async fn requeue(&self, job: &Job) -> Result<(), QueueError> {
        let mut in_flight = self.in_flight.lock().await;
        in_flight.remove(&job.id);
        if let Err(e) = self.offer(job.clone()) {
            in_flight.insert(job.id, job.clone());
            return Err(e);
        }
        Ok(())
    }

    async fn recover_in_flight(&self) -> Result<usize, QueueError> {
        let jobs: Vec<Job> = self.in_flight.lock().await.drain().map(|(_, j)| j).collect();
        let recovered = jobs.len();
        for job in jobs {
            self.offer(job)?;
        }
        Ok(recovered)
    }
}
