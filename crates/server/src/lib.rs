//! Server crate for the movie recommender.
//!
//! Contains the orchestrator that pairs the similarity lookup with poster
//! resolution, and the HTTP surface (HTML page plus JSON API) in front of it.

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod page;

use std::sync::Arc;

use anyhow::{Context, Result};
use data_loader::{CatalogHandle, CatalogStore};
use poster_client::PosterClient;
use tokio::net::TcpListener;
use tracing::info;

pub use api::{create_router, AppState};
pub use config::Config;
pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator, RecommendationOutcome};

/// Wire the loaded catalog and a TMDB poster client into application state
pub fn build_state(config: &Config, store: Arc<CatalogStore>) -> Result<AppState> {
    let posters = PosterClient::new(config.poster_config()).context("Failed to build poster client")?;
    Ok(AppState::new(
        store,
        Arc::new(posters),
        config.placeholder_poster_url.clone(),
    ))
}

/// Load the catalog through `handle` off the async runtime
pub async fn load_catalog(handle: CatalogHandle) -> Result<Arc<CatalogStore>, data_loader::DataLoadError> {
    match tokio::task::spawn_blocking(move || handle.get()).await {
        Ok(result) => result,
        Err(e) => Err(data_loader::DataLoadError::IoError(std::io::Error::other(e))),
    }
}

/// Serve until Ctrl-C
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Movie recommender listening on http://{}", addr);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
