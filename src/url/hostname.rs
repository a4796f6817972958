use crate::UrlError;
use url::Url;

/// Conventional prefix ignored when comparing hosts
pub const WWW_PREFIX: &str = "www.";

/// Returns the hostname of a URL for locality comparisons
///
/// The hostname is the URL's authority component (`[userinfo@]host[:port]`),
/// with the host lowercased and the scheme's default port omitted.
/// When `strip_www` is set, a leading `www.` is removed so that
/// `https://www.test.com` and `https://test.com` compare equal.
///
/// URLs without an authority (`mailto:`, `javascript:`) yield an empty string.
///
/// # Arguments
///
/// * `url` - The absolute URL
/// * `strip_www` - Whether to drop a leading `www.`
///
/// # Returns
///
/// * `Ok(String)` - The (possibly stripped) authority
/// * `Err(UrlError)` - The URL could not be parsed
///
/// # Examples
///
/// ```
/// use locality_crawler::url::hostname_of;
///
/// assert_eq!(hostname_of("https://www.test.com/p", true).unwrap(), "test.com");
/// assert_eq!(hostname_of("https://www.test.com/p", false).unwrap(), "www.test.com");
/// ```
pub fn hostname_of(url: &str, strip_www: bool) -> Result<String, UrlError> {
    let parsed = Url::parse(url).map_err(|e| UrlError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let authority = parsed.authority();

    if strip_www {
        if let Some(stripped) = authority.strip_prefix(WWW_PREFIX) {
            return Ok(stripped.to_string());
        }
    }

    Ok(authority.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_www_stripped_is_idempotent() {
        let with_www = hostname_of("https://www.test.com/p", true).unwrap();
        let without_www = hostname_of("https://test.com/p", true).unwrap();
        assert_eq!(with_www, "test.com");
        assert_eq!(with_www, without_www);
    }

    #[test]
    fn test_keep_www_when_not_stripping() {
        let host = hostname_of("https://www.test.com/", false).unwrap();
        assert_eq!(host, "www.test.com");
    }

    #[test]
    fn test_only_leading_www_is_stripped() {
        let host = hostname_of("https://docs.www.test.com/", true).unwrap();
        assert_eq!(host, "docs.www.test.com");
    }

    #[test]
    fn test_port_is_part_of_hostname() {
        let host = hostname_of("http://127.0.0.1:8080/page", true).unwrap();
        assert_eq!(host, "127.0.0.1:8080");
    }

    #[test]
    fn test_default_port_is_dropped() {
        assert_eq!(hostname_of("https://a.test:443/x", true).unwrap(), "a.test");
        assert_eq!(hostname_of("http://a.test:80/", true).unwrap(), "a.test");
        assert_eq!(hostname_of("https://a.test:80/", true).unwrap(), "a.test:80");
    }

    #[test]
    fn test_subdomain_is_distinct() {
        let host = hostname_of("https://blog.example.com/post", true).unwrap();
        assert_eq!(host, "blog.example.com");
    }

    #[test]
    fn test_host_is_lowercased() {
        let host = hostname_of("https://WWW.Example.COM/", true).unwrap();
        assert_eq!(host, "example.com");
    }

    #[test]
    fn test_javascript_link_has_empty_hostname() {
        let host = hostname_of("javascript:void(0)", true).unwrap();
        assert_eq!(host, "");
    }

    #[test]
    fn test_relative_url_is_invalid() {
        let result = hostname_of("/just/a/path", true);
        assert!(matches!(result, Err(UrlError::InvalidUrl { .. })));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(hostname_of("not a url", true).is_err());
    }
}
