//! # Recommender Crate
//!
//! Given a movie title, returns the five most similar movies according to
//! the precomputed similarity matrix held by a [`data_loader::CatalogStore`].
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CatalogHandle;
//! use recommender::Recommender;
//!
//! let store = CatalogHandle::new("data").get()?;
//! let recommender = Recommender::new(store);
//!
//! let (titles, ids) = recommender.recommend("Avatar")?.into_parallel();
//! ```
//!
//! The lookup is pure: the same title against the same store always
//! yields the same ranking.

pub mod similar;
pub mod types;

// Re-export commonly used types
pub use similar::{rank_row, Recommender, DEFAULT_LIMIT};
pub use types::{RecommendError, Recommendation, RecommendationSet};
