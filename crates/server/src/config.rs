use std::path::PathBuf;
use std::time::Duration;

use poster_client::{
    PosterClientConfig, DEFAULT_API_KEY, DEFAULT_API_URL, DEFAULT_IMAGE_BASE_URL,
    PLACEHOLDER_POSTER_URL,
};
use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding `movie_dict.json` and `similarity.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// TMDB API key
    #[serde(default = "default_tmdb_api_key")]
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// CDN prefix for poster paths
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Image shown when a poster cannot be resolved
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Per-request timeout for poster lookups
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_tmdb_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

fn default_tmdb_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_poster_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_placeholder_poster_url() -> String {
    PLACEHOLDER_POSTER_URL.to_string()
}

fn default_poster_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            tmdb_api_key: default_tmdb_api_key(),
            tmdb_api_url: default_tmdb_api_url(),
            poster_base_url: default_poster_base_url(),
            placeholder_poster_url: default_placeholder_poster_url(),
            poster_timeout_secs: default_poster_timeout_secs(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Settings for the poster client
    pub fn poster_config(&self) -> PosterClientConfig {
        let api_key = if self.tmdb_api_key.trim().is_empty() {
            default_tmdb_api_key()
        } else {
            self.tmdb_api_key.clone()
        };

        PosterClientConfig {
            api_url: self.tmdb_api_url.clone(),
            api_key,
            image_base_url: self.poster_base_url.clone(),
            placeholder_url: self.placeholder_poster_url.clone(),
            timeout: Duration::from_secs(self.poster_timeout_secs),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
