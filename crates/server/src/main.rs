//! Web front end for the movie recommender.
//!
//! Loads the catalog once, then serves the recommendation page until
//! interrupted. A catalog that cannot be loaded stops startup with a
//! message instead of serving a broken page.

use anyhow::Result;
use tracing::{error, info};

use data_loader::CatalogHandle;
use server::{build_state, load_catalog, serve, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting movie recommender");

    let handle = CatalogHandle::new(&config.data_dir);
    let store = match load_catalog(handle).await {
        Ok(store) => store,
        Err(e) => {
            error!("Error loading data: {}", e);
            eprintln!(
                "Could not load movie data from {}: {}. Please check that {} and {} are present.",
                config.data_dir.display(),
                e,
                data_loader::MOVIES_FILE,
                data_loader::SIMILARITY_FILE,
            );
            std::process::exit(1);
        }
    };
    info!("Loaded {} movies successfully!", store.len());

    let state = build_state(&config, store)?;
    serve(&config, state).await
}
