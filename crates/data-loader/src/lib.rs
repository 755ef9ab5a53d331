//! # Data Loader Crate
//!
//! Loads the precomputed movie catalog and its similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, SimilarityMatrix, CatalogStore)
//! - **parser**: Deserialize the two JSON artifacts
//! - **index**: Validate the artifacts against each other and build the store
//! - **handle**: Load-once access shared by the server and the CLI
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CatalogHandle;
//!
//! let handle = CatalogHandle::new("data");
//! let store = handle.get()?; // deserializes on first call only
//!
//! let index = store.index_of("Avatar").unwrap();
//! let row = store.similarity_row(index).unwrap();
//! println!("{} has {} similarity scores", store.get(index).unwrap().title, row.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod handle;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use handle::CatalogHandle;
pub use parser::{MOVIES_FILE, SIMILARITY_FILE};
pub use types::{CatalogStore, MovieId, MovieIndex, MovieRecord, SimilarityMatrix};
