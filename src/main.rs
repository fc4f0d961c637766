use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use bloodwork::presentation::bootstrap::{Components, load_settings, shutdown_signal};
use bloodwork::presentation::config::QueueProviderSetting;
use bloodwork::presentation::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (environment, settings) = load_settings("api")?;

    let components = Components::build(&settings).await?;
    let shutdown = shutdown_signal();

    // An in-memory queue only exists inside this process, so its consumers
    // have to live here too.
    let embedded_workers = if settings.queue.provider == QueueProviderSetting::Memory {
        let worker = Arc::new(components.analysis_worker(&settings)?);
        tracing::info!(
            concurrency = settings.worker.concurrency,
            "Starting embedded analysis workers"
        );
        Some(worker.spawn_pool(settings.worker.concurrency, shutdown.clone()))
    } else {
        None
    };

    let router = create_router(components.app_state(&settings));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let mut server_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = server_shutdown.wait_for(|stop| *stop).await;
        })
        .await?;

    if let Some(mut workers) = embedded_workers {
        while workers.join_next().await.is_some() {}
    }

    tracing::info!("API stopped");
    Ok(())
}
