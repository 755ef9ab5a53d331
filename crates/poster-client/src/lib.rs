//! Poster lookup client for the TMDB movie API.
//!
//! This crate resolves a movie id to a displayable poster URL. It handles:
//! - Building the HTTP client with a bounded per-request timeout
//! - Calling `GET /3/movie/{id}?api_key=...`
//! - Turning `poster_path` into a full CDN URL
//! - Falling back to a placeholder image on any failure
//!
//! [`PosterClient::fetch_poster`] never returns an error. Failures are
//! logged and replaced by the placeholder URL, so callers can render a
//! slot for every recommendation no matter what the remote service does.

use std::time::Duration;

use async_trait::async_trait;
use data_loader::MovieId;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Environment variable holding the TMDB API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Key used when `TMDB_API_KEY` is not set
pub const DEFAULT_API_KEY: &str = "32093a00302155e261380888da3fdfee";

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org";

/// CDN prefix the `poster_path` is appended to
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500/";

/// Shown whenever no poster can be resolved
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the catalog API.
///
/// These never leave [`PosterClient::fetch_poster`]; they exist so the
/// failure reason can be logged.
#[derive(Error, Debug)]
pub enum PosterFetchError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Request to catalog API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Catalog API returned status {0}")]
    Status(StatusCode),
}

/// Settings for the poster lookup
#[derive(Debug, Clone)]
pub struct PosterClientConfig {
    pub api_url: String,
    pub api_key: String,
    pub image_base_url: String,
    pub placeholder_url: String,
    pub timeout: Duration,
}

impl Default for PosterClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key_from_env(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            placeholder_url: PLACEHOLDER_POSTER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Read the API key from the environment, falling back to the built-in key
pub fn api_key_from_env() -> String {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_KEY.to_string())
}

/// Anything that can turn a movie id into a poster URL.
///
/// Implementations must be total: every call yields a URL.
#[async_trait]
pub trait PosterSource: Send + Sync {
    async fn fetch_poster(&self, movie_id: MovieId) -> String;
}

/// The subset of the movie details response we care about
#[derive(Debug, Deserialize)]
struct MovieDetails {
    poster_path: Option<String>,
}

/// HTTP client for the TMDB movie endpoint
#[derive(Debug, Clone)]
pub struct PosterClient {
    http: Client,
    config: PosterClientConfig,
}

impl PosterClient {
    /// Build a client; the timeout in `config` applies to every request
    pub fn new(config: PosterClientConfig) -> Result<Self, PosterFetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(PosterFetchError::ClientBuild)?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PosterClientConfig {
        &self.config
    }

    /// Resolve a movie id to a poster URL, or the placeholder on any failure
    #[instrument(skip(self))]
    pub async fn fetch_poster(&self, movie_id: MovieId) -> String {
        match self.try_fetch_poster(movie_id).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!("Movie {} has no poster, using placeholder", movie_id);
                self.config.placeholder_url.clone()
            }
            Err(e) => {
                warn!("Poster lookup for movie {} failed: {}", movie_id, e);
                self.config.placeholder_url.clone()
            }
        }
    }

    /// The fallible lookup behind [`PosterClient::fetch_poster`].
    ///
    /// `Ok(None)` means the movie exists but has no poster.
    pub async fn try_fetch_poster(
        &self,
        movie_id: MovieId,
    ) -> Result<Option<String>, PosterFetchError> {
        let url = format!(
            "{}/3/movie/{}",
            self.config.api_url.trim_end_matches('/'),
            movie_id
        );

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PosterFetchError::Status(status));
        }

        let details: MovieDetails = response.json().await?;

        Ok(details
            .poster_path
            .filter(|path| !path.trim().is_empty())
            .map(|path| self.poster_url(&path)))
    }

    /// Join the CDN base and a `poster_path` with exactly one slash.
    ///
    /// TMDB paths start with `/` and the default base ends with one, so
    /// plain concatenation would give `.../w500//abc.jpg`. Slashes on both
    /// sides of the join are collapsed instead.
    fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.config.image_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl PosterSource for PosterClient {
    async fn fetch_poster(&self, movie_id: MovieId) -> String {
        PosterClient::fetch_poster(self, movie_id).await
    }
}
