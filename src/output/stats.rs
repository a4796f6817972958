//! Crawl statistics
//!
//! Counters gathered by the traversal engine while it runs, and a
//! human-readable printout for the end of a run.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl finished
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages fetched, ranked and recorded
    pub pages_processed: u64,

    /// Pages that could not be fetched
    pub pages_failed: u64,

    /// Links queued for the next depth
    pub links_new: u64,

    /// Links dropped because they were visited or already queued
    pub links_duplicate: u64,

    /// Links removed by the filter policy
    pub links_filtered: u64,

    /// Processed pages per depth
    pub pages_by_depth: BTreeMap<u32, u64>,

    /// Deepest depth whose queue was crawled
    pub depths_crawled: u32,
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_processed: 0,
            pages_failed: 0,
            links_new: 0,
            links_duplicate: 0,
            links_filtered: 0,
            pages_by_depth: BTreeMap::new(),
            depths_crawled: 0,
        }
    }

    /// Records a processed page and what happened to its links
    pub fn record_page(&mut self, depth: u32, new: usize, duplicate: usize, filtered: usize) {
        self.pages_processed += 1;
        self.links_new += new as u64;
        self.links_duplicate += duplicate as u64;
        self.links_filtered += filtered as u64;
        *self.pages_by_depth.entry(depth).or_insert(0) += 1;
    }

    pub fn record_failure(&mut self) {
        self.pages_failed += 1;
    }

    pub fn record_depth(&mut self, depth: u32) {
        self.depths_crawled = self.depths_crawled.max(depth);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Returns the crawl duration in milliseconds, once finished
    pub fn duration_millis(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds())
    }

    /// Returns the share of attempted pages that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_processed + self.pages_failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.pages_processed as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(millis) = stats.duration_millis() {
        println!("  Duration: {:.2}s", millis as f64 / 1000.0);
    }
    println!("  Depths crawled: {}", stats.depths_crawled);
    println!();

    println!("Pages:");
    println!("  Processed: {}", stats.pages_processed);
    println!("  Failed: {}", stats.pages_failed);
    for (depth, count) in &stats.pages_by_depth {
        println!("  Depth {}: {}", depth, count);
    }
    println!();

    println!("Links:");
    println!("  New: {}", stats.links_new);
    println!("  Duplicate: {}", stats.links_duplicate);
    println!("  Filtered: {}", stats.links_filtered);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully processed)",
        stats.success_rate(),
        stats.pages_processed,
        stats.pages_processed + stats.pages_failed
    );
}
