//! CatalogStore building and validation.
//!
//! Both artifacts are parsed in parallel with `rayon::join`, then checked
//! against each other before the store is handed out:
//! - the catalog is non-empty
//! - the matrix has exactly one row per movie
//! - every row has exactly one column per movie

use crate::error::{DataLoadError, Result};
use crate::parser::{self, MOVIES_FILE, SIMILARITY_FILE};
use crate::types::*;
use std::path::Path;
use std::time::Instant;
use tracing::info;

impl CatalogStore {
    /// Load the catalog and similarity matrix from a data directory.
    ///
    /// This is the expensive step; wrap it in a
    /// [`CatalogHandle`](crate::CatalogHandle) so it runs at most once.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", data_dir);
        let start = Instant::now();

        let movies_path = data_dir.join(MOVIES_FILE);
        let similarity_path = data_dir.join(SIMILARITY_FILE);

        // The matrix is N^2 and dominates load time, parse it alongside
        let (movies, rows) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );
        let movies = movies?;
        let rows = rows?;

        let store = Self::try_new(movies, rows)?;

        info!(
            "Loaded {} movies and a {}x{} similarity matrix in {:.2?}",
            store.len(),
            store.similarity.dim(),
            store.similarity.dim(),
            start.elapsed()
        );
        Ok(store)
    }

    /// Validate and pair an in-memory catalog with its similarity rows
    pub fn try_new(movies: Vec<MovieRecord>, rows: Vec<Vec<f32>>) -> Result<Self> {
        validate(&movies, &rows)?;
        let similarity = SimilarityMatrix::from_square_rows(rows);
        Ok(Self::new(movies, similarity))
    }
}

/// Check that the matrix lines up with the catalog
fn validate(movies: &[MovieRecord], rows: &[Vec<f32>]) -> Result<()> {
    if movies.is_empty() {
        return Err(DataLoadError::EmptyCatalog);
    }

    if rows.len() != movies.len() {
        return Err(DataLoadError::RowCountMismatch {
            rows: rows.len(),
            movies: movies.len(),
        });
    }

    if let Some((row, found)) = rows
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != movies.len())
        .map(|(i, r)| (i, r.len()))
    {
        return Err(DataLoadError::ShapeMismatch {
            expected: movies.len(),
            row,
            found,
        });
    }

    Ok(())
}
