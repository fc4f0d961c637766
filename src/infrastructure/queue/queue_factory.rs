use std::sync::Arc;

use crate::application::ports::{JobQueue, QueueError, ResultBackend};
use crate::presentation::config::{QueueProviderSetting, QueueSettings};

use super::{InMemoryJobQueue, InMemoryResultBackend, RedisJobQueue, RedisResultBackend};

/// The queue and the result backend a process talks to.
#[derive(Clone)]
pub struct QueueBackends {
    pub queue: Arc<dyn JobQueue>,
    pub results: Arc<dyn ResultBackend>,
}

pub struct QueueFactory;

impl QueueFactory {
    pub async fn create(settings: &QueueSettings) -> Result<QueueBackends, QueueError> {
        match settings.provider {
            QueueProviderSetting::Redis => {
                tracing::info!(
                    queue = %settings.queue_name,
                    track_started = settings.track_started,
                    "Connecting to Redis broker and result backend"
                );
                let queue =
                    RedisJobQueue::connect(&settings.broker_url, &settings.queue_name).await?;
                let results = RedisResultBackend::connect(
                    &settings.result_backend_url,
                    &settings.queue_name,
                    settings.result_ttl_seconds,
                )
                .await
                .map_err(|e| QueueError::ConnectionFailed(e.to_string()))?;
                Ok(QueueBackends {
                    queue: Arc::new(queue),
                    results: Arc::new(results),
                })
            }
            QueueProviderSetting::Memory => {
                tracing::info!(capacity = settings.capacity, "Using in-memory job queue");
                Ok(QueueBackends {
                    queue: Arc::new(InMemoryJobQueue::new(settings.capacity)),
                    results: Arc::new(InMemoryResultBackend::new()),
                })
            }
        }
    }
}
