//! Result types returned by the recommender.

use data_loader::{MovieId, MovieIndex, MovieRecord};
use serde::Serialize;
use thiserror::Error;

/// One recommended movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Position in the catalog
    pub index: MovieIndex,
    pub movie_id: MovieId,
    pub title: String,
    /// Similarity to the query movie
    pub score: f32,
}

/// Ranked recommendations for a single query title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub query: MovieRecord,
    /// Descending similarity, ties in catalog order
    pub items: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn titles(&self) -> Vec<String> {
        self.items.iter().map(|r| r.title.clone()).collect()
    }

    pub fn ids(&self) -> Vec<MovieId> {
        self.items.iter().map(|r| r.movie_id).collect()
    }

    /// Split into the two parallel sequences `(titles, ids)`
    pub fn into_parallel(self) -> (Vec<String>, Vec<MovieId>) {
        self.items
            .into_iter()
            .map(|r| (r.title, r.movie_id))
            .unzip()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Per-request lookup failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// No catalog entry has exactly this title
    #[error("Movie not found in catalog: '{title}'")]
    NotFound { title: String },
}
