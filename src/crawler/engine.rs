//! Traversal engine - main crawl orchestration logic
//!
//! This module contains the depth-by-depth crawl loop, which:
//! - Reads each depth's queue from the frontier
//! - Processes every URL into a ranked page
//! - Feeds discovered links back into the frontier for the next depth
//! - Records results in visitation order
//! - Stops early when a depth has nothing to crawl

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::page::{process_page, LinkFilter};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::workspace::prepare_webpages_dir;
use crate::output::{CrawlRecord, CrawlStatistics, ResultSink};
use crate::state::EngineState;
use crate::url::normalize_seed;
use crate::CrawlError;
use std::path::PathBuf;

/// Runs one bounded-depth crawl from a seed URL
pub struct TraversalEngine<F, E> {
    fetcher: F,
    extractor: E,
    filter: LinkFilter,
    frontier: Frontier,
    results: ResultSink,
    statistics: CrawlStatistics,
    state: EngineState,
    max_depth: u32,
}

impl<F: Fetcher, E: LinkExtractor> TraversalEngine<F, E> {
    /// Creates an engine with the default link filter
    ///
    /// # Arguments
    ///
    /// * `seed` - The URL crawled at depth 1
    /// * `max_depth` - The deepest level to crawl (0 crawls nothing)
    /// * `fetcher` - Retrieves page content
    /// * `extractor` - Turns page content into links
    pub fn new(seed: &str, max_depth: u32, fetcher: F, extractor: E) -> Self {
        Self {
            fetcher,
            extractor,
            filter: LinkFilter::default(),
            frontier: Frontier::new(seed),
            results: ResultSink::new(),
            statistics: CrawlStatistics::new(),
            state: EngineState::Idle,
            max_depth,
        }
    }

    /// Creates an engine using the filter and retry policy from `config`
    pub fn from_config(
        seed: &str,
        max_depth: u32,
        config: &CrawlerConfig,
        fetcher: F,
        extractor: E,
    ) -> Self {
        Self::new(seed, max_depth, fetcher, extractor)
            .with_filter(LinkFilter::new(config.filtered_prefixes.iter().cloned()))
            .with_retry_failed(config.retry_failed_urls)
    }

    /// Replaces the link filter
    pub fn with_filter(mut self, filter: LinkFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets whether URLs that failed to download may be queued again
    pub fn with_retry_failed(mut self, retry_failed: bool) -> Self {
        self.frontier = std::mem::take(&mut self.frontier).with_retry_failed(retry_failed);
        self
    }

    /// Runs the crawl to completion
    ///
    /// Per-page failures are logged and skipped. The only errors returned
    /// are illegal state transitions, e.g. crawling twice with one engine.
    pub async fn crawl(&mut self) -> Result<(), CrawlError> {
        if self.max_depth == 0 {
            tracing::info!("Max depth is 0, nothing to crawl");
        }

        for depth in 1..=self.max_depth {
            self.state.transition(EngineState::Running { depth })?;

            let queue = self.frontier.current_queue(depth).to_vec();
            tracing::info!("Crawling depth {} [{} links]", depth, queue.len());

            if queue.is_empty() {
                tracing::info!("No URLs to crawl at depth {}, stopping", depth);
                break;
            }

            self.frontier.prepare_next_queue(depth);

            for (url_idx, url) in queue.iter().enumerate() {
                self.crawl_page(url, depth, url_idx).await;
            }

            self.statistics.record_depth(depth);
        }

        self.state.transition(EngineState::Done)?;
        self.statistics.finish();

        tracing::info!(
            "Crawl completed: {} pages processed, {} failed",
            self.statistics.pages_processed,
            self.statistics.pages_failed
        );

        Ok(())
    }

    /// Processes a single URL of the current depth
    async fn crawl_page(&mut self, url: &str, depth: u32, url_idx: usize) {
        let page = match process_page(url, &self.fetcher, &self.extractor, &self.filter).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("#{}: {}", url_idx, e);
                self.frontier.mark_failed(url);
                self.statistics.record_failure();
                return;
            }
        };

        let mut new_links = 0;
        let mut duplicate_links = 0;
        for link in &page.links {
            if self.frontier.offer(link, depth + 1) {
                new_links += 1;
            } else {
                duplicate_links += 1;
            }
        }

        tracing::info!(
            "#{}: {} [rank = {:.6}, links: new = {} duplicate = {} filtered = {}]",
            url_idx,
            page.url,
            page.rank,
            new_links,
            duplicate_links,
            page.filtered_links.len()
        );

        self.frontier.mark_visited(&page.url);
        self.statistics
            .record_page(depth, new_links, duplicate_links, page.filtered_links.len());
        self.results.append(CrawlRecord {
            url: page.url,
            rank: page.rank,
            depth,
            links: page.links,
        });
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn results(&self) -> &ResultSink {
        &self.results
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.statistics
    }

    /// Consumes the engine, returning its results and statistics
    pub fn into_results(self) -> (ResultSink, CrawlStatistics) {
        (self.results, self.statistics)
    }
}

/// Everything a finished crawl produced
#[derive(Debug)]
pub struct CrawlOutcome {
    pub results: ResultSink,
    pub statistics: CrawlStatistics,
    pub report_path: PathBuf,
}

/// Runs a complete crawl over HTTP
///
/// This function orchestrates the entire crawl process:
///
/// 1. Canonicalize the seed, adding `https://` when it has no scheme
/// 2. Prepare the webpages directory
/// 3. Build the HTTP fetcher and check that the seed is reachable
/// 4. Crawl depth by depth from the seed
/// 5. Write the results report
///
/// # Arguments
///
/// * `seed` - The URL to start from
/// * `max_depth` - The deepest level to crawl
/// * `config` - The crawler configuration
///
/// # Errors
///
/// * `CrawlError::UrlError` - The seed is not a valid URL
/// * `CrawlError::UnreachableSeed` - The seed could not be fetched; nothing
///   was crawled and no report was written
///
/// # Example
///
/// ```no_run
/// use locality_crawler::config::Config;
/// use locality_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl("example.com", 2, &Config::default()).await?;
/// println!("Report written to {}", outcome.report_path.display());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(seed: &str, max_depth: u32, config: &Config) -> Result<CrawlOutcome, CrawlError> {
    let seed = normalize_seed(seed)?;

    let webpages_dir = prepare_webpages_dir(&config.crawler)?;
    let fetcher = HttpFetcher::new(&config.fetcher, &webpages_dir)?;

    let seed_check = fetcher.fetch(&seed).await;
    if let Err(source) = seed_check {
        return Err(CrawlError::UnreachableSeed { url: seed, source });
    }

    tracing::info!("Crawling {} up to depth {}", seed, max_depth);

    let mut engine =
        TraversalEngine::from_config(&seed, max_depth, &config.crawler, fetcher, HtmlLinkExtractor);
    engine.crawl().await?;

    let report_path = webpages_dir.join(&config.crawler.results_file);
    let (results, statistics) = engine.into_results();
    results.write_report(&report_path)?;
    tracing::info!("See the results in the csv file: {}", report_path.display());

    Ok(CrawlOutcome {
        results,
        statistics,
        report_path,
    })
}
