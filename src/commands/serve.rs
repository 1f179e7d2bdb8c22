use std::time::Duration;

use anyhow::{Context, Result};
use moneybear::{
    config::{Config, SearchMode},
    http::{AppState, HttpServer},
};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Run the search API until Ctrl+C or SIGTERM
pub async fn serve(mut config: Config, listen: Option<String>, mode: Option<SearchMode>) -> Result<()> {
    if let Some(addr) = listen {
        config.server.listen_addr = addr;
    }
    if let Some(mode) = mode {
        config.search.mode = mode;
    }
    config.validate()?;

    match config.search.mode {
        SearchMode::Passthrough => info!("Forwarding searches to {}", config.upstream.endpoint),
        SearchMode::Catalog => info!(
            "Serving mock catalog, {} results per page",
            config.catalog.page_size
        ),
    }

    let state = AppState::from_config(&config).context("Failed to initialize search backend")?;
    let server = HttpServer::new(config.server.clone(), state);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let mut handle = tokio::spawn(async move { server.run(shutdown_rx).await });

    tokio::select! {
        _ = signal::ctrl_c() => info!("Received Ctrl+C, shutting down"),
        _ = wait_for_sigterm() => info!("Received SIGTERM, shutting down"),
        finished = &mut handle => {
            // Server stopped on its own, e.g. the address was taken
            return finished.context("HTTP server task panicked")?;
        }
    }

    let _ = shutdown_tx.send(());

    let abort = handle.abort_handle();
    match tokio::time::timeout(Duration::from_secs(5), handle).await {
        Ok(Ok(Ok(()))) => info!("HTTP server shut down cleanly"),
        Ok(Ok(Err(e))) => error!("HTTP server failed: {}", e),
        Ok(Err(e)) => error!("HTTP server task failed: {}", e),
        Err(_) => {
            warn!("HTTP server did not shut down within 5s, aborting");
            abort.abort();
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Failed to register SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
