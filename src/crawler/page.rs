//! Page model: one visit of one URL
//!
//! A [`Page`] is created per visit, downloads its content through a
//! [`Fetcher`], hands the body to a [`LinkExtractor`], splits the links with a
//! [`LinkFilter`] and finally computes its locality rank.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::LinkExtractor;
use crate::url::hostname_of;
use crate::{FetchError, UrlError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rank value of a page whose links have not been filtered yet
pub const RANK_UNSET: f64 = -1.0;

/// Why a page could not be processed
#[derive(Debug, Error)]
pub enum PageFailure {
    #[error("failed to download {url}: {source}")]
    Download { url: String, source: FetchError },

    #[error(transparent)]
    InvalidUrl(#[from] UrlError),
}

/// Decides which extracted links are kept
///
/// A link is filtered out iff it starts with one of the excluded prefixes.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    excluded_prefixes: Vec<String>,
}

impl LinkFilter {
    pub fn new<I, S>(excluded_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_prefixes: excluded_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, link: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| link.starts_with(prefix.as_str()))
    }

    /// Splits links into `(kept, filtered)`, preserving order in both
    pub fn partition(&self, links: Vec<String>) -> (Vec<String>, Vec<String>) {
        links.into_iter().partition(|link| !self.is_excluded(link))
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new(["javascript:"])
    }
}

/// Computes the fraction of `links` that point at `hostname`
///
/// Returns 0 for an empty list. Links whose hostname cannot be derived count
/// as foreign.
pub fn locality_rank(hostname: &str, links: &[String]) -> f64 {
    if links.is_empty() {
        return 0.0;
    }

    let same_host = links
        .iter()
        .filter(|link| match hostname_of(link, true) {
            Ok(host) => host == hostname,
            Err(e) => {
                tracing::debug!("Counting {} as foreign: {}", link, e);
                false
            }
        })
        .count();

    same_host as f64 / links.len() as f64
}

/// State of one page visit
#[derive(Debug)]
pub struct Page {
    url: String,
    hostname: String,
    downloaded: bool,
    raw_content: Option<PathBuf>,
    links: Vec<String>,
    filtered_links: Vec<String>,
    rank: f64,
}

impl Page {
    /// Creates a page, deriving its hostname once
    pub fn new(url: &str) -> Result<Self, UrlError> {
        let hostname = hostname_of(url, true)?;
        Ok(Self {
            url: url.to_string(),
            hostname,
            downloaded: false,
            raw_content: None,
            links: Vec::new(),
            filtered_links: Vec::new(),
            rank: RANK_UNSET,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn is_downloaded(&self) -> bool {
        self.downloaded
    }

    /// Handle to the cached raw content, when the fetcher cached it
    pub fn raw_content(&self) -> Option<&Path> {
        self.raw_content.as_deref()
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn filtered_links(&self) -> &[String] {
        &self.filtered_links
    }

    /// The computed rank, or `None` before [`Page::compute_rank`] ran
    pub fn rank(&self) -> Option<f64> {
        (self.rank != RANK_UNSET).then_some(self.rank)
    }

    /// Downloads the page and returns its body
    pub async fn download<F: Fetcher>(&mut self, fetcher: &F) -> Result<String, FetchError> {
        let content = fetcher.fetch(&self.url).await?;
        self.downloaded = true;
        self.raw_content = content.cache_path;
        Ok(content.body)
    }

    /// Extracts links from the body and splits them with `filter`
    ///
    /// Any rank computed earlier is reset.
    pub fn parse_links<E: LinkExtractor>(&mut self, extractor: &E, body: &str, filter: &LinkFilter) {
        let raw_links = extractor.extract(body, &self.url);
        let (links, filtered_links) = filter.partition(raw_links);
        self.links = links;
        self.filtered_links = filtered_links;
        self.rank = RANK_UNSET;
    }

    /// Computes the locality rank over the kept links
    pub fn compute_rank(&mut self) -> f64 {
        self.rank = locality_rank(&self.hostname, &self.links);
        self.rank
    }

    fn into_processed(self) -> ProcessedPage {
        ProcessedPage {
            url: self.url,
            hostname: self.hostname,
            rank: self.rank,
            links: self.links,
            filtered_links: self.filtered_links,
            raw_content: self.raw_content,
        }
    }
}

/// Outcome of a successfully processed page
#[derive(Debug, Clone)]
pub struct ProcessedPage {
    pub url: String,
    pub hostname: String,
    pub rank: f64,
    pub links: Vec<String>,
    pub filtered_links: Vec<String>,
    pub raw_content: Option<PathBuf>,
}

impl ProcessedPage {
    /// Number of links the extractor returned before filtering
    pub fn raw_link_count(&self) -> usize {
        self.links.len() + self.filtered_links.len()
    }
}

/// Fetches, parses, filters and ranks one URL
pub async fn process_page<F, E>(
    url: &str,
    fetcher: &F,
    extractor: &E,
    filter: &LinkFilter,
) -> Result<ProcessedPage, PageFailure>
where
    F: Fetcher,
    E: LinkExtractor,
{
    let mut page = Page::new(url)?;

    let body = page
        .download(fetcher)
        .await
        .map_err(|source| PageFailure::Download {
            url: url.to_string(),
            source,
        })?;

    page.parse_links(extractor, &body, filter);
    page.compute_rank();

    Ok(page.into_processed())
}
