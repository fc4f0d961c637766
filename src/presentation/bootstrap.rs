//! Wiring shared by the API and worker binaries.

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::ports::{Analyzer, BlobStore};
use crate::application::services::{
    AnalysisWorker, ReportAnalyzer, SubmissionService, WorkerConfig,
};
use crate::infrastructure::llm::LlmClientFactory;
use crate::infrastructure::observability::{TracingConfig, init_tracing};
use crate::infrastructure::queue::{QueueBackends, QueueFactory};
use crate::infrastructure::storage::BlobStoreFactory;
use crate::infrastructure::text_processing::FileLoaderFactory;
use crate::presentation::config::{Environment, Settings};
use crate::presentation::state::AppState;

/// Loads `.env`, resolves the environment, reads settings and starts tracing.
pub fn load_settings(component: &str) -> anyhow::Result<(Environment, Settings)> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        &TracingConfig::from_settings(&settings.logging, environment),
        component,
    )?;

    Ok((environment, settings))
}

/// The ports both binaries need, built once from settings.
#[derive(Clone)]
pub struct Components {
    pub blob_store: Arc<dyn BlobStore>,
    pub backends: QueueBackends,
}

impl Components {
    pub async fn build(settings: &Settings) -> anyhow::Result<Self> {
        let blob_store = BlobStoreFactory::create(&settings.storage)?;
        let backends = QueueFactory::create(&settings.queue).await?;
        Ok(Self {
            blob_store,
            backends,
        })
    }

    pub fn app_state(&self, settings: &Settings) -> AppState {
        AppState {
            submission_service: Arc::new(SubmissionService::new(
                Arc::clone(&self.blob_store),
                Arc::clone(&self.backends.queue),
                Arc::clone(&self.backends.results),
            )),
            max_upload_size_bytes: settings.server.max_upload_size_bytes,
        }
    }

    pub fn analysis_worker(&self, settings: &Settings) -> anyhow::Result<AnalysisWorker> {
        let llm_client = LlmClientFactory::create(&settings.llm)?;
        let analyzer: Arc<dyn Analyzer> = Arc::new(ReportAnalyzer::new(
            Arc::clone(&self.blob_store),
            FileLoaderFactory::create(),
            llm_client,
            settings.analysis.system_prompt.clone(),
            settings.analysis.max_report_chars,
        ));

        Ok(AnalysisWorker::new(
            Arc::clone(&self.backends.queue),
            Arc::clone(&self.backends.results),
            Arc::clone(&self.blob_store),
            analyzer,
            WorkerConfig {
                poll_timeout: settings.worker.poll_timeout(),
                error_backoff: settings.worker.error_backoff(),
                record_attempts: settings.worker.record_attempts.max(1),
                track_started: settings.queue.track_started,
            },
        ))
    }
}

/// Flips to `true` on Ctrl-C or SIGTERM.
pub fn shutdown_signal() -> watch::Receiver<bool> {
    let (sender, receiver) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        let _ = sender.send(true);
    });
    receiver
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
