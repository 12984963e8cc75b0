// Receipt Points - Web Server
// Processes receipts over HTTP and keeps them in memory for the process lifetime

use anyhow::{Context, Result};
use receipt_points::api::{router, AppState};
use receipt_points::{ReceiptService, ServerConfig, VERSION};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    let addr = config.socket_addr();

    // Nothing is persisted: receipts are gone when the process exits
    let state = AppState::new(ReceiptService::new());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(version = VERSION, %addr, "receipt server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("receipt server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
