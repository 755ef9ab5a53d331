use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use data_loader::{MovieId, MovieRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::orchestrator::MovieRecommendation;
use crate::page::render_page;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub count: usize,
    pub movies: Vec<MovieRecord>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub titles: Vec<String>,
    pub movie_ids: Vec<MovieId>,
    pub posters: Vec<String>,
    pub recommendations: Vec<MovieRecommendation>,
}

impl RecommendResponse {
    fn new(query: String, recommendations: Vec<MovieRecommendation>) -> Self {
        Self {
            query,
            titles: recommendations.iter().map(|r| r.title.clone()).collect(),
            movie_ids: recommendations.iter().map(|r| r.movie_id).collect(),
            posters: recommendations.iter().map(|r| r.poster_url.clone()).collect(),
            recommendations,
        }
    }
}

// Handlers

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "movies": state.store().len(),
    }))
}

pub async fn index_page(State(state): State<AppState>) -> Html<String> {
    Html(render_page(state.store(), None, None))
}

/// Handles the "Show Recommendations" form submission
pub async fn recommend_page(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Html<String> {
    let Some(title) = params.title.filter(|t| !t.is_empty()) else {
        return Html(render_page(state.store(), None, None));
    };

    let outcome = state.orchestrator.recommend_or_empty(&title).await;
    Html(render_page(state.store(), Some(&title), Some(&outcome)))
}

pub async fn list_movies(State(state): State<AppState>) -> Json<MoviesResponse> {
    let movies = state.store().movies().to_vec();
    Json(MoviesResponse {
        count: movies.len(),
        movies,
    })
}

pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Json<RecommendResponse>> {
    let title = params
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidInput("title query parameter is required".to_string()))?;

    let recommendations = state.orchestrator.get_recommendations(&title).await?;
    Ok(Json(RecommendResponse::new(title, recommendations)))
}

#[cfg(test)]
mod tests {
    use super::super::create_router;
    use super::*;
    use crate::orchestrator::tests::{build_test_store, MockPosterSource, PLACEHOLDER};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(
            build_test_store(),
            Arc::new(MockPosterSource::default()),
            PLACEHOLDER,
        );
        create_router(state)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["movies"], 6);
    }

    #[tokio::test]
    async fn test_index_page_lists_titles() {
        let (status, body) = get(create_test_app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Loaded 6 movies successfully!"));
        assert!(body.contains("<option value=\"F\">F</option>"));
    }

    #[tokio::test]
    async fn test_recommend_page_shows_five_slots() {
        let (status, body) = get(create_test_app(), "/recommend?title=A").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Here are 5 movies similar to 'A':"));
        assert_eq!(body.matches("class=\"slot\"").count(), 5);
        assert!(body.contains("https://image.tmdb.org/t/p/w500/2.jpg"));
    }

    #[tokio::test]
    async fn test_recommend_page_unknown_title_shows_error() {
        let (status, body) =
            get(create_test_app(), "/recommend?title=Nonexistent%20Movie%209999").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Could not generate recommendations. Please try again."));
        assert!(!body.contains("class=\"slot\""));
    }

    #[tokio::test]
    async fn test_list_movies() {
        let (status, body) = get(create_test_app(), "/api/movies").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["count"], 6);
        assert_eq!(json["movies"][0]["title"], "A");
        assert_eq!(json["movies"][5]["id"], 6);
    }

    #[tokio::test]
    async fn test_api_recommend() {
        let (status, body) = get(create_test_app(), "/api/recommend?title=A").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["query"], "A");
        assert_eq!(json["titles"], serde_json::json!(["B", "C", "D", "E", "F"]));
        assert_eq!(json["movie_ids"], serde_json::json!([2, 3, 4, 5, 6]));
        assert_eq!(json["posters"][3], PLACEHOLDER);
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_api_recommend_not_found() {
        let (status, body) = get(create_test_app(), "/api/recommend?title=Zzz").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["recommendations"], serde_json::json!([]));
        assert!(json["error"].as_str().unwrap().contains("Zzz"));
    }

    #[tokio::test]
    async fn test_api_recommend_requires_title() {
        let (status, _) = get(create_test_app(), "/api/recommend").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
