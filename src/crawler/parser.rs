//! HTML link extraction
//!
//! This module turns page content into the ordered list of absolute
//! outbound links the traversal engine works with.

use scraper::{Html, Selector};
use url::Url;

/// Turns page content into absolute outbound links
pub trait LinkExtractor {
    /// Returns the links found in `content`, in document order
    ///
    /// Relative references are resolved against `base_url`.
    fn extract(&self, content: &str, base_url: &str) -> Vec<String>;
}

/// [`LinkExtractor`] reading `<a href>` elements with scraper
///
/// # Link Extraction Rules
///
/// **Include:**
/// - every `<a href="...">`, resolved against the page URL
/// - non-HTTP schemes such as `javascript:` or `mailto:` (filtering is
///   the traversal engine's job)
///
/// **Exclude:**
/// - empty `href` values
/// - fragment-only links (same page anchors)
/// - hrefs that cannot be resolved to a URL
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, content: &str, base_url: &str) -> Vec<String> {
        let base = match Url::parse(base_url) {
            Ok(base) => Some(base),
            Err(e) => {
                tracing::debug!("Base URL {} is not absolute ({}), keeping absolute links only", base_url, e);
                None
            }
        };

        extract_links(content, base.as_ref())
    }
}

/// Extracts all `<a href>` links from an HTML document
///
/// # Example
///
/// ```
/// use locality_crawler::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(html, Some(&base)), vec!["https://example.com/page"]);
/// ```
pub fn extract_links(html: &str, base_url: Option<&Url>) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
fn resolve_link(href: &str, base_url: Option<&Url>) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let resolved = match base_url {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    resolved.ok().map(|url| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/dir/page";

    fn extract(html: &str) -> Vec<String> {
        HtmlLinkExtractor.extract(html, BASE)
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = extract(r#"<a href="https://other.com/page">Link</a>"#);
        assert_eq!(links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_root_relative_link() {
        let links = extract(r#"<a href="/other">Link</a>"#);
        assert_eq!(links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_extract_path_relative_link() {
        let links = extract(r#"<a href="sibling">Link</a>"#);
        assert_eq!(links, vec!["https://example.com/dir/sibling"]);
    }

    #[test]
    fn test_javascript_link_is_kept_for_filtering() {
        let links = extract(r#"<a href="javascript:void(0)">Link</a>"#);
        assert_eq!(links, vec!["javascript:void(0)"]);
    }

    #[test]
    fn test_skip_fragment_only() {
        let links = extract(r##"<a href="#section">Jump</a>"##);
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_empty_href() {
        let links = extract(r#"<a href="  ">Nothing</a><a>No href</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_document_order_and_duplicates_preserved() {
        let html = r#"
            <html><body>
                <a href="/b">B</a>
                <a href="/a">A</a>
                <a href="/b">B again</a>
            </body></html>
        "#;
        assert_eq!(
            extract(html),
            vec![
                "https://example.com/b",
                "https://example.com/a",
                "https://example.com/b",
            ]
        );
    }

    #[test]
    fn test_relative_links_dropped_without_base() {
        let html = r#"<a href="/rel">R</a><a href="https://abs.test/">A</a>"#;
        let links = HtmlLinkExtractor.extract(html, "not a url");
        assert_eq!(links, vec!["https://abs.test/"]);
    }
}
