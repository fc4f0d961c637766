use async_trait::async_trait;

/// A chat model that answers one question given a system message.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited by the model provider")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("model returned no completion")]
    EmptyCompletion,
    #[error("misconfigured llm provider: {0}")]
    Misconfigured(String),
}
