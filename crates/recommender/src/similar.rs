//! Similar-movie lookup over the precomputed similarity matrix.
//!
//! ## Algorithm
//! 1. Resolve the query title to its catalog row (exact, case-sensitive,
//!    first match wins)
//! 2. Pair every column of that row with its index
//! 3. Stable sort by score descending, so equal scores stay in catalog order
//! 4. Drop the query's own index
//! 5. Keep the first `limit` (default 5) and attach id and title
//!
//! The query is removed by index rather than by assuming it sorts first.
//! With a diagonal that is the strict row maximum both give the same
//! answer; when another movie ties the diagonal this keeps that movie.

use crate::types::{RecommendError, Recommendation, RecommendationSet};
use data_loader::{CatalogStore, MovieIndex};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of recommendations shown per query
pub const DEFAULT_LIMIT: usize = 5;

/// Looks up the movies most similar to a given title
#[derive(Debug, Clone)]
pub struct Recommender {
    /// Shared reference to the loaded catalog (read-only, so no Mutex needed)
    store: Arc<CatalogStore>,

    /// How many movies to return per query
    limit: usize,
}

impl Recommender {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Configure how many recommendations to return (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Recommend movies similar to `title`.
    ///
    /// Returns up to `limit` entries; fewer only when the catalog itself
    /// has fewer than `limit + 1` movies.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str) -> Result<RecommendationSet, RecommendError> {
        let not_found = || RecommendError::NotFound {
            title: title.to_string(),
        };

        let query_index = self.store.index_of(title).ok_or_else(not_found)?;
        let query = self.store.get(query_index).ok_or_else(not_found)?.clone();
        let row = self.store.similarity_row(query_index).ok_or_else(not_found)?;

        let items: Vec<Recommendation> = rank_row(row)
            .into_iter()
            .filter(|&(index, _)| index != query_index)
            .take(self.limit)
            .filter_map(|(index, score)| {
                let movie = self.store.get(index)?;
                Some(Recommendation {
                    index,
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    score,
                })
            })
            .collect();

        debug!(
            "Ranked {} movies for '{}', returning {}",
            row.len(),
            title,
            items.len()
        );

        Ok(RecommendationSet { query, items })
    }
}

/// Order a similarity row by descending score.
///
/// The sort is stable, so equal scores keep ascending index order. NaN
/// scores sink to the bottom instead of poisoning the order.
pub fn rank_row(row: &[f32]) -> Vec<(MovieIndex, f32)> {
    let mut ranked: Vec<(MovieIndex, f32)> = row.iter().copied().enumerate().collect();
    ranked.par_sort_by(|a, b| by_score_desc(a.1, b.1));
    ranked
}

fn by_score_desc(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
