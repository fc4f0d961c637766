use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output whatever the settings say.
    pub fn from_settings(settings: &LoggingSettings, environment: Environment) -> Self {
        let defaults = Self::default();
        Self {
            environment: environment.as_str().to_string(),
            json_format: settings.enable_json || defaults.json_format,
            default_filter: settings.level.clone(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            default_filter: LoggingSettings::default().level,
        }
    }
}
