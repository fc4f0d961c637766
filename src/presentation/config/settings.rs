use std::time::Duration;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an experienced doctor reviewing a patient's blood test report. \
Answer the patient's question using only the report below. Explain abnormal values in plain \
language, say which results are within range, and recommend consulting a physician for \
anything that needs follow-up. Do not invent values that are not in the report.\n\n\
Blood test report:\n{report}";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub queue: QueueSettings,
    pub worker: WorkerSettings,
    pub llm: LlmSettings,
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.toml`, `appsettings.<env>.toml` and `APP_*`
    /// environment variables (`__` separates nested keys, e.g.
    /// `APP_QUEUE__BROKER_URL`). Every file is optional.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!(
                    "appsettings.{}",
                    environment.as_str().to_lowercase()
                ))
                .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_size_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_size_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub data_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::Local,
            data_dir: "data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueProviderSetting {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueSettings {
    pub provider: QueueProviderSetting,
    pub broker_url: String,
    pub result_backend_url: String,
    /// Record STARTED when a worker picks a job up, so polls can tell
    /// "queued" from "running".
    pub track_started: bool,
    pub queue_name: String,
    pub result_ttl_seconds: u64,
    /// Only used by the in-memory queue.
    pub capacity: usize,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            provider: QueueProviderSetting::Redis,
            broker_url: "redis://localhost:6379/1".to_string(),
            result_backend_url: "redis://localhost:6379/1".to_string(),
            track_started: true,
            queue_name: "bloodwork:analysis".to_string(),
            result_ttl_seconds: 86_400,
            capacity: 64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerSettings {
    pub concurrency: usize,
    pub poll_timeout_seconds: u64,
    pub error_backoff_ms: u64,
    /// Attempts at writing a finished job's outcome before the job is requeued.
    pub record_attempts: u32,
    pub recover_on_startup: bool,
}

impl WorkerSettings {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_seconds.max(1))
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            concurrency: 2,
            poll_timeout_seconds: 5,
            error_backoff_ms: 1_000,
            record_attempts: 5,
            recover_on_startup: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderSetting {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "lmstudio")]
    LmStudio,
    Azure,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProviderSetting,
    pub api_key: String,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_api_version: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProviderSetting::OpenAi,
            api_key: String::new(),
            base_url: None,
            azure_endpoint: None,
            azure_api_version: "2024-06-01".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            max_tokens: 1_500,
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub system_prompt: String,
    pub max_report_chars: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_report_chars: 24_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,bloodwork=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}
