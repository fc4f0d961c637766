use std::sync::Arc;

use bloodwork::presentation::bootstrap::{Components, load_settings, shutdown_signal};
use bloodwork::presentation::config::QueueProviderSetting;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (environment, settings) = load_settings("worker")?;

    if settings.queue.provider == QueueProviderSetting::Memory {
        anyhow::bail!(
            "the in-memory queue cannot be shared between processes; \
             set queue.provider = \"redis\" or run the API with its embedded workers"
        );
    }

    let components = Components::build(&settings).await?;

    if settings.worker.recover_on_startup {
        let recovered = components.backends.queue.recover_in_flight().await?;
        tracing::info!(recovered, "Requeued unacknowledged jobs");
    }

    let worker = Arc::new(components.analysis_worker(&settings)?);
    tracing::info!(
        environment = %environment,
        concurrency = settings.worker.concurrency,
        queue = %settings.queue.queue_name,
        "Starting analysis workers"
    );

    let mut pool = worker.spawn_pool(settings.worker.concurrency, shutdown_signal());
    while let Some(joined) = pool.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "Worker task ended abnormally");
        }
    }

    tracing::info!("Worker stopped");
    Ok(())
}
