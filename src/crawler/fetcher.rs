//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The [`Fetcher`] capability the traversal engine is written against
//! - Building HTTP clients with the configured user agent and timeout
//! - Caching fetched bodies on disk under a per-URL file name
//! - Error classification

use crate::config::FetcherConfig;
use crate::FetchError;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Raw content of a fetched page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Page body as text
    pub body: String,

    /// Where the body was cached, if the fetcher keeps a cache
    pub cache_path: Option<PathBuf>,
}

impl PageContent {
    /// Content that was not written to any cache
    pub fn uncached(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            cache_path: None,
        }
    }
}

/// Retrieves the raw content of a URL
///
/// Implementations own their timeout and transport error handling. Callers
/// treat every error the same way.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PageContent, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use locality_crawler::config::FetcherConfig;
/// use locality_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns the cache file name for a URL
///
/// The name is the hex SHA-256 digest of the URL, so every page gets its own
/// file and re-fetching a URL overwrites its previous copy.
pub fn cache_file_name(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{}.html", hex::encode(hasher.finalize()))
}

/// [`Fetcher`] backed by reqwest
pub struct HttpFetcher {
    client: Client,
    cache_dir: Option<PathBuf>,
}

impl HttpFetcher {
    /// Creates a fetcher from configuration
    ///
    /// When `cache_pages` is set, bodies are written to `cache_dir`.
    pub fn new(config: &FetcherConfig, cache_dir: &Path) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        let cache_dir = config.cache_pages.then(|| cache_dir.to_path_buf());
        Ok(Self { client, cache_dir })
    }

    /// Creates a fetcher around an existing client, without a page cache
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            cache_dir: None,
        }
    }

    /// Sets the directory fetched pages are cached in
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    async fn cache(&self, url: &str, body: &str) -> Result<Option<PathBuf>, FetchError> {
        let Some(dir) = &self.cache_dir else {
            return Ok(None);
        };

        let path = dir.join(cache_file_name(url));
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| FetchError::Cache {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!("Cached {} at {}", url, path.display());
        Ok(Some(path))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| classify_error(url, e))?;
        let cache_path = self.cache(url, &body).await?;

        Ok(PageContent { body, cache_path })
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
