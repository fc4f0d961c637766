use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProviderSetting, LlmSettings};

use super::mock_llm_client::MockLlmClient;
use super::openai_client::{ApiAuth, OpenAiClient};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientError> {
        let (endpoint, auth) = match settings.provider {
            LlmProviderSetting::Mock => {
                tracing::warn!("Using mock LLM client; analyses are canned");
                return Ok(Arc::new(MockLlmClient));
            }
            LlmProviderSetting::OpenAi => (
                format!(
                    "{}/chat/completions",
                    settings
                        .base_url
                        .as_deref()
                        .unwrap_or(OPENAI_BASE_URL)
                        .trim_end_matches('/')
                ),
                ApiAuth::Bearer,
            ),
            LlmProviderSetting::LmStudio => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    LlmClientError::Misconfigured(
                        "base_url required for lmstudio provider".to_string(),
                    )
                })?;
                (
                    format!("{}/chat/completions", base_url.trim_end_matches('/')),
                    ApiAuth::Bearer,
                )
            }
            LlmProviderSetting::Azure => {
                let endpoint = settings.azure_endpoint.as_deref().ok_or_else(|| {
                    LlmClientError::Misconfigured(
                        "azure_endpoint required for azure provider".to_string(),
                    )
                })?;
                (
                    format!(
                        "{}/openai/deployments/{}/chat/completions?api-version={}",
                        endpoint.trim_end_matches('/'),
                        settings.chat_model,
                        settings.azure_api_version
                    ),
                    ApiAuth::AzureApiKey,
                )
            }
        };

        tracing::info!(
            model = %settings.chat_model,
            endpoint = %endpoint,
            "Using chat completions client"
        );
        Ok(Arc::new(OpenAiClient::new(
            endpoint,
            auth,
            settings.api_key.clone(),
            settings.chat_model.clone(),
            settings.max_tokens,
            settings.temperature,
        )))
    }
}
