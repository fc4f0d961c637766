//! Redis list-backed job queue.
//!
//! Jobs are pushed onto `{queue_name}` and atomically moved to
//! `{queue_name}:processing` when a worker takes them (BRPOPLPUSH). They
//! leave the processing list only when acknowledged, so a worker that dies
//! mid-job leaves the job behind for [`JobQueue::recover_in_flight`].

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::application::ports::{JobQueue, QueueError};
use crate::domain::{Job, JobId};

pub struct RedisJobQueue {
    client: redis::Client,
    redis: ConnectionManager,
    queue_name: String,
    processing_queue: String,
}

fn broker_error(e: redis::RedisError) -> QueueError {
    QueueError::Broker(e.to_string())
}

impl RedisJobQueue {
    pub async fn connect(redis_url: &str, queue_name: &str) -> Result<Self, QueueError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| QueueError::ConnectionFailed(e.to_string()))?;

        let redis = ConnectionManager::new(client.clone())
            .await
            .map_err(|e| QueueError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            redis,
            queue_name: queue_name.to_string(),
            processing_queue: format!("{}:processing", queue_name),
        })
    }

    /// Number of jobs waiting to be picked up.
    pub async fn len(&self) -> Result<usize, QueueError> {
        let mut conn = self.redis.clone();
        conn.llen(&self.queue_name).await.map_err(broker_error)
    }

    /// Number of jobs taken by a worker but not yet acknowledged.
    pub async fn in_flight_len(&self) -> Result<usize, QueueError> {
        let mut conn = self.redis.clone();
        conn.llen(&self.processing_queue).await.map_err(broker_error)
    }

    pub async fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.len().await? == 0)
    }

    /// The processing-list entry for `job_id`, exactly as stored.
    async fn find_in_flight(&self, job_id: JobId) -> Result<Option<String>, QueueError> {
        let mut conn = self.redis.clone();
        let jobs: Vec<String> = conn
            .lrange(&self.processing_queue, 0, -1)
            .await
            .map_err(broker_error)?;

        Ok(jobs.into_iter().find(|job_data| {
            serde_json::from_str::<Job>(job_data).is_ok_and(|job| job.id == job_id)
        }))
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    #[tracing::instrument(skip(self, job), fields(job_id = %job.id, queue = %self.queue_name))]
    async fn enqueue(&self, job: &Job) -> Result<(), QueueError> {
        let serialized = serde_json::to_string(job)?;
        let mut conn = self.redis.clone();
        conn.lpush::<_, _, ()>(&self.queue_name, serialized)
            .await
            .map_err(broker_error)?;
        Ok(())
    }

    async fn dequeue(&self, timeout: Duration) -> Result<Option<Job>, QueueError> {
        // A blocking pop holds its connection for the whole wait, so it must
        // not share the multiplexed manager with acks and status writes.
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| QueueError::ConnectionFailed(e.to_string()))?;
        let timeout_secs = timeout.as_secs().max(1);

        let result: Option<String> = redis::cmd("BRPOPLPUSH")
            .arg(&self.queue_name)
            .arg(&self.processing_queue)
            .arg(timeout_secs)
            .query_async(&mut conn)
            .await
            .map_err(broker_error)?;

        match result {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn acknowledge(&self, job_id: JobId) -> Result<(), QueueError> {
        let Some(job_data) = self.find_in_flight(job_id).await? else {
            // Already gone: acknowledged by an earlier delivery of the same job.
            return Ok(());
        };
        let mut conn = self.redis.clone();
        conn.lrem::<_, _, ()>(&self.processing_queue, 1, &job_data)
            .await
            .map_err(broker_error)
    }

    #[tracing::instrument(skip(self, job), fields(job_id = %job.id, queue = %self.queue_name))]
    async fn requeue(&self, job: &Job) -> Result<(), QueueError> {
        let job_data = match self.find_in_flight(job.id).await? {
            Some(job_data) => job_data,
            None => serde_json::to_string(job)?,
        };

        // RPUSH puts it at the consuming end, so it is retried next.
        let mut conn = self.redis.clone();
        let mut pipe = redis::pipe();
        pipe.atomic()
            .lrem(&self.processing_queue, 1, &job_data)
            .rpush(&self.queue_name, &job_data);
        let _: () = pipe.query_async(&mut conn).await.map_err(broker_error)?;
        Ok(())
    }

    async fn recover_in_flight(&self) -> Result<usize, QueueError> {
        let mut conn = self.redis.clone();
        let jobs: Vec<String> = conn
            .lrange(&self.processing_queue, 0, -1)
            .await
            .map_err(broker_error)?;

        let mut recovered = 0;
        for job_data in jobs {
            let mut pipe = redis::pipe();
            pipe.atomic()
                .lrem(&self.processing_queue, 1, &job_data)
                .rpush(&self.queue_name, &job_data);
            let _: () = pipe.query_async(&mut conn).await.map_err(broker_error)?;
            recovered += 1;
        }

        Ok(recovered)
    }
}
