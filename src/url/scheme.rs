use crate::UrlError;
use url::Url;

/// Scheme prepended to seed URLs that have none
pub const DEFAULT_SCHEME: &str = "https://";

/// Makes sure a user supplied URL carries an HTTP(S) scheme
///
/// Anything that does not start with `http://` or `https://` gets
/// [`DEFAULT_SCHEME`] prepended.
///
/// ```
/// use locality_crawler::url::ensure_scheme;
///
/// assert_eq!(ensure_scheme("example.com"), "https://example.com");
/// assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
/// ```
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, url)
    }
}

/// Serializes `url` the way discovered links are serialized
///
/// Links come out of [`Url::join`], so a URL taken from anywhere else must
/// go through here before it is compared with them.
pub fn canonical_url(url: &str) -> Result<String, UrlError> {
    Url::parse(url)
        .map(|parsed| parsed.to_string())
        .map_err(|e| UrlError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
}

/// Turns a user supplied seed into the canonical URL the crawl starts from
///
/// ```
/// use locality_crawler::url::normalize_seed;
///
/// assert_eq!(normalize_seed("example.com").unwrap(), "https://example.com/");
/// assert!(normalize_seed("http://").is_err());
/// ```
pub fn normalize_seed(url: &str) -> Result<String, UrlError> {
    canonical_url(&ensure_scheme(url))
}
