//! Error types for the data-loader crate.
//!
//! Every variant here is startup-fatal: if the catalog or the similarity
//! matrix cannot be loaded, nothing downstream can serve a lookup.

use thiserror::Error;

/// Errors that can occur while loading the precomputed artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Artifact is not present in the data directory
    #[error("{path} file not found!")]
    FileNotFound { path: String },

    /// I/O error occurred while reading an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Artifact exists but could not be deserialized
    #[error("Failed to parse {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// The `movie_id` and `title` columns have different lengths
    #[error("Column length mismatch: {movie_ids} movie ids but {titles} titles")]
    ColumnMismatch { movie_ids: usize, titles: usize },

    /// Similarity matrix does not line up with the catalog
    #[error("Similarity matrix shape mismatch: expected {expected}x{expected}, row {row} has {found} columns")]
    ShapeMismatch {
        expected: usize,
        row: usize,
        found: usize,
    },

    /// Similarity matrix row count does not equal the catalog length
    #[error("Similarity matrix has {rows} rows but catalog has {movies} movies")]
    RowCountMismatch { rows: usize, movies: usize },

    /// Catalog contained no movies
    #[error("No movies data available!")]
    EmptyCatalog,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
