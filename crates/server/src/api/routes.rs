use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Creates the main router: the HTML page plus a small JSON API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Page
        .route("/", get(handlers::index_page))
        .route("/recommend", get(handlers::recommend_page))
        // JSON API
        .route("/api/movies", get(handlers::list_movies))
        .route("/api/recommend", get(handlers::recommend))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
