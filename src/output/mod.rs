//! Output module for crawl results
//!
//! This module handles:
//! - Collecting per-page results in visitation order
//! - Writing the results report
//! - Recording crawl statistics

mod report;
pub mod stats;

pub use report::{CrawlRecord, ResultSink, REPORT_HEADER};
pub use stats::{print_statistics, CrawlStatistics};
