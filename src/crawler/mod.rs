//! Crawler module for bounded-depth traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and page caching
//! - HTML link extraction
//! - The depth-indexed frontier
//! - Page processing (filtering and locality rank)
//! - Overall crawl orchestration

mod engine;
mod fetcher;
mod frontier;
mod page;
mod parser;
mod workspace;

pub use engine::{run_crawl, CrawlOutcome, TraversalEngine};
pub use fetcher::{build_http_client, cache_file_name, Fetcher, HttpFetcher, PageContent};
pub use frontier::Frontier;
pub use page::{locality_rank, process_page, LinkFilter, Page, PageFailure, ProcessedPage, RANK_UNSET};
pub use parser::{extract_links, HtmlLinkExtractor, LinkExtractor};
pub use workspace::prepare_webpages_dir;
