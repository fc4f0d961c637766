//! Job records stored as Redis hashes with a TTL.
//!
//! Each record lives at `{prefix}:result:{job_id}` with two fields: `status`
//! (checked by the Lua scripts) and `record` (the JSON [`JobRecord`]).

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};

use crate::application::ports::{ResultBackend, ResultBackendError};
use crate::domain::{JobId, JobRecord};

/// KEYS[1] = record key; ARGV = status, record json, ttl seconds.
const REGISTER: &str = r"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return 0
end
redis.call('HSET', KEYS[1], 'status', ARGV[1], 'record', ARGV[2])
redis.call('EXPIRE', KEYS[1], ARGV[3])
return 1
";

/// Same arguments as REGISTER. Terminal records are never overwritten and a
/// started job never goes back to pending.
const TRANSITION: &str = r"
local current = redis.call('HGET', KEYS[1], 'status')
if current == 'SUCCEEDED' or current == 'FAILED' then
    return 0
end
if current == 'STARTED' and ARGV[1] == 'PENDING' then
    return 0
end
redis.call('HSET', KEYS[1], 'status', ARGV[1], 'record', ARGV[2])
redis.call('EXPIRE', KEYS[1], ARGV[3])
return 1
";

pub struct RedisResultBackend {
    redis: ConnectionManager,
    prefix: String,
    ttl_seconds: u64,
}

fn backend_error(e: redis::RedisError) -> ResultBackendError {
    ResultBackendError::Backend(e.to_string())
}

impl RedisResultBackend {
    pub async fn connect(
        redis_url: &str,
        prefix: &str,
        ttl_seconds: u64,
    ) -> Result<Self, ResultBackendError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| ResultBackendError::ConnectionFailed(e.to_string()))?;
        let redis = ConnectionManager::new(client)
            .await
            .map_err(|e| ResultBackendError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            redis,
            prefix: prefix.to_string(),
            ttl_seconds,
        })
    }

    fn key(&self, job_id: JobId) -> String {
        format!("{}:result:{}", self.prefix, job_id)
    }

    async fn write(&self, script: &str, record: &JobRecord) -> Result<bool, ResultBackendError> {
        let record_json = serde_json::to_string(record)
            .map_err(|e| ResultBackendError::Corrupt(e.to_string()))?;
        let mut conn = self.redis.clone();

        let written: i64 = Script::new(script)
            .key(self.key(record.job_id))
            .arg(record.status.as_str())
            .arg(record_json)
            .arg(self.ttl_seconds)
            .invoke_async(&mut conn)
            .await
            .map_err(backend_error)?;

        Ok(written == 1)
    }
}

#[async_trait]
impl ResultBackend for RedisResultBackend {
    #[tracing::instrument(skip(self, record), fields(job_id = %record.job_id))]
    async fn register(&self, record: &JobRecord) -> Result<bool, ResultBackendError> {
        self.write(REGISTER, record).await
    }

    #[tracing::instrument(
        skip(self, record),
        fields(job_id = %record.job_id, status = %record.status)
    )]
    async fn transition(&self, record: &JobRecord) -> Result<bool, ResultBackendError> {
        self.write(TRANSITION, record).await
    }

    async fn get(&self, job_id: JobId) -> Result<Option<JobRecord>, ResultBackendError> {
        let mut conn = self.redis.clone();
        let data: Option<String> = conn
            .hget(self.key(job_id), "record")
            .await
            .map_err(backend_error)?;

        data.map(|s| {
            serde_json::from_str(&s).map_err(|e| ResultBackendError::Corrupt(e.to_string()))
        })
        .transpose()
    }

    async fn remove(&self, job_id: JobId) -> Result<(), ResultBackendError> {
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(self.key(job_id))
            .await
            .map_err(backend_error)
    }
}
