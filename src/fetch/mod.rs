//! HTTP fetching with caching.
//!
//! Fetches JSON payloads from the stats API and caches raw responses
//! locally, so repeated runs within the TTL don't re-hit the API.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use url::Url;

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata stored alongside a cached response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub content_length: usize,
    pub expires_at: DateTime<Utc>,
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Directory to cache raw responses
    pub cache_dir: PathBuf,

    /// How long cached responses are considered fresh
    pub cache_ttl: Duration,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Delay between consecutive API requests
    pub request_delay: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/raw"),
            cache_ttl: Duration::from_secs(3600), // 1 hour
            timeout: Duration::from_secs(30),
            user_agent: format!("hit-tracker/{}", env!("CARGO_PKG_VERSION")),
            request_delay: Duration::from_millis(500),
        }
    }
}

/// HTTP fetcher with local response caching.
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("hit-tracker/0.1.0")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a fetcher with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(FetcherConfig::default())
    }

    /// Fetch a JSON payload, using the cache if fresh.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let body_path = self.body_path_for_url(url);
        let meta_path = self.meta_path_for_url(url);

        if let Some(body) = self.check_cache(url, &body_path, &meta_path).await? {
            return Ok(serde_json::from_str(&body)?);
        }

        let body = self.fetch_and_cache(url, &body_path, &meta_path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch a JSON payload from the network, ignoring the cache.
    pub async fn get_json_fresh<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let body_path = self.body_path_for_url(url);
        let meta_path = self.meta_path_for_url(url);

        let body = self.fetch_and_cache(url, &body_path, &meta_path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Return the cached body if present and fresh.
    async fn check_cache(
        &self,
        url: &Url,
        body_path: &Path,
        meta_path: &Path,
    ) -> Result<Option<String>, FetchError> {
        if !body_path.exists() || !meta_path.exists() {
            return Ok(None);
        }

        let meta_content = fs::read_to_string(meta_path).await?;
        let meta: CacheMetadata = match serde_json::from_str(&meta_content) {
            Ok(m) => m,
            Err(_) => return Ok(None),
        };

        if Utc::now() > meta.expires_at {
            debug!("Cache expired for {}", url);
            return Ok(None);
        }

        info!("Serving {} from cache", url);
        Ok(Some(fs::read_to_string(body_path).await?))
    }

    /// Fetch from the network and cache the body plus metadata.
    async fn fetch_and_cache(
        &self,
        url: &Url,
        body_path: &Path,
        meta_path: &Path,
    ) -> Result<String, FetchError> {
        info!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(FetchError::RateLimited {
                host: url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;

        if let Some(parent) = body_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(body_path, &body).await?;

        let fetched_at = Utc::now();
        let meta = CacheMetadata {
            url: url.to_string(),
            fetched_at,
            content_length: body.len(),
            expires_at: fetched_at
                + chrono::Duration::seconds(self.config.cache_ttl.as_secs() as i64),
        };
        fs::write(meta_path, serde_json::to_string_pretty(&meta)?).await?;

        Ok(body)
    }

    /// Cache path for a URL's response body.
    fn body_path_for_url(&self, url: &Url) -> PathBuf {
        let hash = Self::url_hash(url);
        let host = url.host_str().unwrap_or("unknown");

        self.config
            .cache_dir
            .join(host)
            .join(format!("{}.json", hash))
    }

    /// Cache path for a URL's metadata.
    fn meta_path_for_url(&self, url: &Url) -> PathBuf {
        let hash = Self::url_hash(url);
        let host = url.host_str().unwrap_or("unknown");

        self.config
            .cache_dir
            .join(host)
            .join(format!("{}.meta.json", hash))
    }

    /// Hash a URL (including its query string) to a short string.
    fn url_hash(url: &Url) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_str().as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..8])
    }
}
