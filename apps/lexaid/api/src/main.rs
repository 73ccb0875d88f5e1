use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod app;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    observability::init_metrics()
        .map_err(|e| eyre::eyre!("Failed to install metrics recorder: {}", e))?;

    info!(
        provider = %config.embedding.provider,
        model = %config.embedding.model,
        "Loading embedding model"
    );

    // Model load happens once here; requests share it
    let state = AppState::build(config).await?;

    let router = app::build_router(&state)?;
    let server = state.config.server.clone();

    info!("Starting LexAid API with graceful shutdown (30s timeout)");

    axum_helpers::serve_with_shutdown(router, &server, Duration::from_secs(30), async move {
        // Releases the embedding model and HTTP connection pools
        drop(state);
        info!("Retrieval pipeline released");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("LexAid API shutdown complete");
    Ok(())
}
