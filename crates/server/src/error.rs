use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recommender::RecommendError;
use serde_json::json;

/// Application-level errors surfaced by the JSON API
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Recommend(RecommendError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };

        // Lookups never yield partial results: a failure always carries an
        // empty list next to the message.
        let body = Json(json!({
            "error": self.to_string(),
            "recommendations": [],
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
