use crate::application::ports::{LlmClient, LlmClientError};

/// Answers without calling any model. Used by the `mock` provider so the
/// whole pipeline can run locally without API keys.
pub struct MockLlmClient;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmClientError> {
        Ok(format!(
            "Mock analysis for \"{}\" ({} characters of report context).",
            prompt,
            system.chars().count()
        ))
    }
}
