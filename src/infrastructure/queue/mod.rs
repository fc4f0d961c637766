mod memory_job_queue;
mod memory_result_backend;
mod queue_factory;
mod redis_job_queue;
mod redis_result_backend;

pub use memory_job_queue::InMemoryJobQueue;
pub use memory_result_backend::InMemoryResultBackend;
pub use queue_factory::{QueueBackends, QueueFactory};
pub use redis_job_queue::RedisJobQueue;
pub use redis_result_backend::RedisResultBackend;
