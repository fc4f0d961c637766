//! Logging setup and the request-scoped pieces that feed it.

mod init_tracing;
mod query_redaction;
mod request_id;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use query_redaction::redact_query;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use tracing_config::TracingConfig;
