use serde::Deserialize;

/// Default directory for cached pages and the report
pub const DEFAULT_WEBPAGES_DIR: &str = "webpages";

/// Default report file name
pub const DEFAULT_RESULTS_FILE: &str = "crawl_res.csv";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Traversal and output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Directory holding cached pages and the results file
    #[serde(rename = "webpages-dir")]
    pub webpages_dir: String,

    /// Name of the results file inside `webpages_dir`
    #[serde(rename = "results-file")]
    pub results_file: String,

    /// Remove files left by previous runs before crawling
    #[serde(rename = "clean-webpages-dir")]
    pub clean_webpages_dir: bool,

    /// Allow a URL whose fetch failed to be queued again when rediscovered
    #[serde(rename = "retry-failed-urls")]
    pub retry_failed_urls: bool,

    /// Links starting with any of these prefixes are filtered out
    #[serde(rename = "filtered-prefixes")]
    pub filtered_prefixes: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            webpages_dir: DEFAULT_WEBPAGES_DIR.to_string(),
            results_file: DEFAULT_RESULTS_FILE.to_string(),
            clean_webpages_dir: true,
            retry_failed_urls: true,
            filtered_prefixes: vec!["javascript:".to_string()],
        }
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification
    #[serde(rename = "accept-invalid-certs")]
    pub accept_invalid_certs: bool,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Write each fetched body to the webpages directory
    #[serde(rename = "cache-pages")]
    pub cache_pages: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            accept_invalid_certs: true,
            user_agent: format!("locality-crawler/{}", env!("CARGO_PKG_VERSION")),
            cache_pages: true,
        }
    }
}
