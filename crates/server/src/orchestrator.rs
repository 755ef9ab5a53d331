//! # Recommendation Orchestrator
//!
//! Coordinates one "show recommendations" request:
//! 1. Rank similar movies for the selected title
//! 2. Resolve a poster for each of them concurrently
//! 3. Return the slots in ranking order
//!
//! This is also the request boundary: a title that is not in the catalog
//! becomes an empty result with a message, never a failure that escapes.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use data_loader::{CatalogStore, MovieId};
use poster_client::PosterSource;
use recommender::{RecommendError, Recommendation, Recommender};

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
}

/// Outcome of a request after errors have been absorbed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationOutcome {
    pub query: String,
    pub recommendations: Vec<MovieRecommendation>,
    /// User-visible reason when `recommendations` is empty
    pub error: Option<String>,
}

impl RecommendationOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.recommendations.is_empty()
    }
}

/// Main orchestrator that combines the lookup with poster resolution
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    recommender: Recommender,
    posters: Arc<dyn PosterSource>,
    placeholder_url: String,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over a loaded catalog.
    ///
    /// `placeholder_url` is only used if a poster task dies; the poster
    /// source itself already falls back for every lookup failure.
    pub fn new(
        store: Arc<CatalogStore>,
        posters: Arc<dyn PosterSource>,
        placeholder_url: impl Into<String>,
    ) -> Self {
        Self {
            recommender: Recommender::new(store),
            posters,
            placeholder_url: placeholder_url.into(),
        }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        self.recommender.store()
    }

    /// Recommendations with posters, or `NotFound` for an unknown title
    pub async fn get_recommendations(
        &self,
        title: &str,
    ) -> Result<Vec<MovieRecommendation>, RecommendError> {
        let start_time = Instant::now();

        let ranked = self.recommender.recommend(title)?;
        info!(
            "Ranked {} similar movies for '{}'",
            ranked.len(),
            title
        );

        let recommendations = self.attach_posters(ranked.items).await;

        info!(
            "Total time to get recommendations for '{}': {:.2?}",
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Request-boundary form of [`get_recommendations`](Self::get_recommendations):
    /// failures come back as an empty list plus a message.
    pub async fn recommend_or_empty(&self, title: &str) -> RecommendationOutcome {
        match self.get_recommendations(title).await {
            Ok(recommendations) => RecommendationOutcome {
                query: title.to_string(),
                recommendations,
                error: None,
            },
            Err(e) => {
                warn!("Error generating recommendations: {}", e);
                RecommendationOutcome {
                    query: title.to_string(),
                    recommendations: Vec::new(),
                    error: Some(format!("Error generating recommendations: {}", e)),
                }
            }
        }
    }

    /// Fetch every poster concurrently, keeping ranking order
    async fn attach_posters(&self, ranked: Vec<Recommendation>) -> Vec<MovieRecommendation> {
        let handles: Vec<_> = ranked
            .iter()
            .map(|rec| {
                let posters = Arc::clone(&self.posters);
                let movie_id = rec.movie_id;
                tokio::spawn(async move { posters.fetch_poster(movie_id).await })
            })
            .collect();

        let mut recommendations = Vec::with_capacity(ranked.len());
        for (rec, handle) in ranked.into_iter().zip(handles) {
            let poster_url = match handle.await {
                Ok(url) => url,
                Err(e) => {
                    warn!("Poster task for movie {} failed: {}", rec.movie_id, e);
                    self.placeholder_url.clone()
                }
            };
            recommendations.push(MovieRecommendation {
                movie_id: rec.movie_id,
                title: rec.title,
                score: rec.score,
                poster_url,
            });
        }
        recommendations
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use data_loader::MovieRecord;
    use std::sync::Mutex;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    pub(crate) const PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Image";

    /// Six movies where row 0 has a tie at 0.9 between columns 1 and 2
    pub(crate) fn build_test_store() -> Arc<CatalogStore> {
        let movies = vec![
            MovieRecord::new(1, "A"),
            MovieRecord::new(2, "B"),
            MovieRecord::new(3, "C"),
            MovieRecord::new(4, "D"),
            MovieRecord::new(5, "E"),
            MovieRecord::new(6, "F"),
        ];
        let rows = vec![
            vec![1.0, 0.9, 0.9, 0.5, 0.2, 0.1],
            vec![0.9, 1.0, 0.3, 0.4, 0.6, 0.2],
            vec![0.9, 0.3, 1.0, 0.1, 0.1, 0.7],
            vec![0.5, 0.4, 0.1, 1.0, 0.8, 0.3],
            vec![0.2, 0.6, 0.1, 0.8, 1.0, 0.5],
            vec![0.1, 0.2, 0.7, 0.3, 0.5, 1.0],
        ];
        Arc::new(CatalogStore::try_new(movies, rows).expect("valid test catalog"))
    }

    // ============================================================================
    // Mock Poster Source
    // ============================================================================

    /// Returns a deterministic URL per id, placeholder for odd ids above 4
    #[derive(Default)]
    pub(crate) struct MockPosterSource {
        pub(crate) calls: Mutex<Vec<MovieId>>,
    }

    #[async_trait]
    impl PosterSource for MockPosterSource {
        async fn fetch_poster(&self, movie_id: MovieId) -> String {
            self.calls.lock().unwrap().push(movie_id);
            if movie_id > 4 && movie_id % 2 == 1 {
                PLACEHOLDER.to_string()
            } else {
                format!("https://image.tmdb.org/t/p/w500/{}.jpg", movie_id)
            }
        }
    }

    /// Panics for one id to exercise the task-failure fallback
    struct PanickingPosterSource;

    #[async_trait]
    impl PosterSource for PanickingPosterSource {
        async fn fetch_poster(&self, movie_id: MovieId) -> String {
            if movie_id == 3 {
                panic!("poster source blew up");
            }
            format!("poster-{}", movie_id)
        }
    }

    fn build_test_orchestrator() -> (RecommendationOrchestrator, Arc<MockPosterSource>) {
        let posters = Arc::new(MockPosterSource::default());
        let orchestrator =
            RecommendationOrchestrator::new(build_test_store(), posters.clone(), PLACEHOLDER);
        (orchestrator, posters)
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[tokio::test]
    async fn test_recommendations_in_rank_order_with_posters() {
        let (orchestrator, posters) = build_test_orchestrator();

        let recs = orchestrator.get_recommendations("A").await.unwrap();

        let titles: Vec<_> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "D", "E", "F"]);
        assert_eq!(recs[0].poster_url, "https://image.tmdb.org/t/p/w500/2.jpg");
        assert_eq!(recs[3].poster_url, PLACEHOLDER, "movie 5 has no poster");

        // one lookup per recommended movie
        let mut calls = posters.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec![2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_unknown_title_is_not_found() {
        let (orchestrator, posters) = build_test_orchestrator();

        let result = orchestrator.get_recommendations("Nonexistent Movie 9999").await;

        assert!(matches!(result, Err(RecommendError::NotFound { .. })));
        assert!(posters.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recommend_or_empty_absorbs_not_found() {
        let (orchestrator, _) = build_test_orchestrator();

        let outcome = orchestrator.recommend_or_empty("Nonexistent Movie 9999").await;

        assert!(outcome.recommendations.is_empty());
        assert!(!outcome.is_success());
        assert!(outcome.error.unwrap().contains("Nonexistent Movie 9999"));
    }

    #[tokio::test]
    async fn test_recommend_or_empty_success() {
        let (orchestrator, _) = build_test_orchestrator();

        let outcome = orchestrator.recommend_or_empty("D").await;

        assert!(outcome.is_success());
        assert_eq!(outcome.query, "D");
        assert_eq!(outcome.recommendations.len(), 5);
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let (orchestrator, _) = build_test_orchestrator();

        let first = orchestrator.get_recommendations("B").await.unwrap();
        let second = orchestrator.get_recommendations("B").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_panicking_poster_task_falls_back() {
        let orchestrator = RecommendationOrchestrator::new(
            build_test_store(),
            Arc::new(PanickingPosterSource),
            PLACEHOLDER,
        );

        let recs = orchestrator.get_recommendations("A").await.unwrap();

        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0].poster_url, "poster-2");
        assert_eq!(recs[1].poster_url, PLACEHOLDER);
    }
}
