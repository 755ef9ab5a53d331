//! Parsers for the two persisted artifacts.
//!
//! - `movie_dict.json`: columnar table, `{"movie_id": [..], "title": [..], ..}`
//! - `similarity.json`: `[[f32; N]; N]`, row `i` aligned with movie `i`
//!
//! Columns other than `movie_id` and `title` are ignored.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// File name of the serialized catalog inside the data directory
pub const MOVIES_FILE: &str = "movie_dict.json";

/// File name of the serialized similarity matrix inside the data directory
pub const SIMILARITY_FILE: &str = "similarity.json";

/// Column-oriented shape of `movie_dict.json`
#[derive(Debug, Deserialize)]
struct MovieColumns {
    movie_id: Vec<MovieId>,
    title: Vec<String>,
}

/// Open an artifact, reporting a missing file distinctly from other I/O errors
fn open_artifact(path: &Path) -> Result<BufReader<File>> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: file_label(path),
        });
    }
    Ok(BufReader::new(File::open(path)?))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the catalog artifact into movie records in stored order
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let reader = open_artifact(path)?;
    let columns: MovieColumns =
        serde_json::from_reader(reader).map_err(|e| DataLoadError::ParseError {
            file: file_label(path),
            reason: e.to_string(),
        })?;

    if columns.movie_id.len() != columns.title.len() {
        return Err(DataLoadError::ColumnMismatch {
            movie_ids: columns.movie_id.len(),
            titles: columns.title.len(),
        });
    }

    let movies = columns
        .movie_id
        .into_iter()
        .zip(columns.title)
        .map(|(id, title)| MovieRecord { id, title })
        .collect();

    Ok(movies)
}

/// Parse the similarity artifact into raw rows.
///
/// Shape is checked later against the catalog, where the expected
/// dimension is known.
pub fn parse_similarity(path: &Path) -> Result<Vec<Vec<f32>>> {
    let reader = open_artifact(path)?;
    serde_json::from_reader(reader).map_err(|e| DataLoadError::ParseError {
        file: file_label(path),
        reason: e.to_string(),
    })
}
