use std::sync::Arc;

use data_loader::CatalogStore;
use poster_client::PosterSource;

use crate::orchestrator::RecommendationOrchestrator;

/// Shared application state.
///
/// Everything in here is read-only after startup, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: RecommendationOrchestrator,
}

impl AppState {
    pub fn new(
        store: Arc<CatalogStore>,
        posters: Arc<dyn PosterSource>,
        placeholder_url: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator: RecommendationOrchestrator::new(store, posters, placeholder_url),
        }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        self.orchestrator.store()
    }
}
