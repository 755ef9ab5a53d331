//! Core domain types for the precomputed movie catalog.
//!
//! The catalog and the similarity matrix are aligned by position: row `i`
//! of the matrix describes `catalog[i]`. Nothing in here is mutated once a
//! [`CatalogStore`] has been built.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// External catalog identifier for a movie (the TMDB id)
pub type MovieId = u32;

/// Position of a movie in the catalog and row/column of the similarity matrix
pub type MovieIndex = usize;

// =============================================================================
// Movie Records
// =============================================================================

/// A single movie in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
}

impl MovieRecord {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of pairwise similarity scores, stored row-major.
///
/// Only whole rows are ever handed out; the matrix makes no assumption
/// about symmetry or about the value on the diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from nested rows.
    ///
    /// Returns `None` if the rows do not form an `n x n` square.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Option<Self> {
        let dim = rows.len();
        if rows.iter().any(|row| row.len() != dim) {
            return None;
        }
        Some(Self::from_square_rows(rows))
    }

    /// Flatten rows whose shape has already been checked
    pub(crate) fn from_square_rows(rows: Vec<Vec<f32>>) -> Self {
        let dim = rows.len();
        let scores = rows.into_iter().flatten().collect();
        Self { dim, scores }
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Similarity scores of `index` against every catalog entry
    pub fn row(&self, index: MovieIndex) -> Option<&[f32]> {
        if index >= self.dim {
            return None;
        }
        let start = index * self.dim;
        Some(&self.scores[start..start + self.dim])
    }

    /// Single score lookup
    pub fn score(&self, row: MovieIndex, col: MovieIndex) -> Option<f32> {
        self.row(row)?.get(col).copied()
    }
}

// =============================================================================
// CatalogStore - the loaded, read-only pair
// =============================================================================

/// Catalog plus similarity matrix, loaded together and read many times.
///
/// A title index is built once on construction so lookups don't scan the
/// catalog. Duplicate titles resolve to the earliest catalog entry.
#[derive(Debug)]
pub struct CatalogStore {
    pub(crate) movies: Vec<MovieRecord>,
    pub(crate) similarity: SimilarityMatrix,
    pub(crate) title_index: HashMap<String, MovieIndex>,
}

impl CatalogStore {
    /// Pair an already-validated catalog with its matrix.
    ///
    /// Callers outside this crate go through [`CatalogStore::try_new`] or
    /// [`CatalogStore::load_from_files`], which check the shapes first.
    pub(crate) fn new(movies: Vec<MovieRecord>, similarity: SimilarityMatrix) -> Self {
        let mut title_index = HashMap::with_capacity(movies.len());
        for (index, movie) in movies.iter().enumerate() {
            // first match wins
            title_index.entry(movie.title.clone()).or_insert(index);
        }

        Self {
            movies,
            similarity,
            title_index,
        }
    }

    /// Get a movie by catalog position
    pub fn get(&self, index: MovieIndex) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Resolve an exact, case-sensitive title to its catalog position
    pub fn index_of(&self, title: &str) -> Option<MovieIndex> {
        self.title_index.get(title).copied()
    }

    /// Similarity row for a catalog position
    pub fn similarity_row(&self, index: MovieIndex) -> Option<&[f32]> {
        self.similarity.row(index)
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// All titles in catalog order, for populating a selector
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
