mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, DEFAULT_SYSTEM_PROMPT, LlmProviderSetting, LlmSettings, LoggingSettings,
    QueueProviderSetting, QueueSettings, ServerSettings, Settings, StorageProviderSetting,
    StorageSettings, WorkerSettings,
};
