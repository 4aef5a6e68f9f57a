//! HTTP server for feed recommendations.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::api::{AppState, create_router};
use server::{Config, DataCache};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting feed server with {:?}", config);

    let cache = DataCache::new(config.data_paths(), config.reload_on_change);

    // Warm both snapshots; failures are retried on the first request
    if let Err(e) = cache.feed().await {
        warn!("Warm data not loaded at startup: {}", e);
    }
    if let Err(e) = cache.cold_start().await {
        warn!("Cold-start data not loaded at startup: {}", e);
    }

    let app = create_router(AppState::new(cache));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
