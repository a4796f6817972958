//! Depth-indexed crawl frontier
//!
//! This module handles:
//! - One ordered queue of URLs per depth level
//! - The global visited set
//! - Deduplication of URLs offered while crawling a depth
//! - What happens to URLs whose fetch failed

use crate::url::canonical_url;
use std::collections::{BTreeMap, HashSet};

/// Frontier manages the per-depth queues and the visited set
///
/// A URL is *pending* from the moment it is queued until the engine settles
/// it with [`Frontier::mark_visited`] or [`Frontier::mark_failed`]. Offers of
/// a visited or pending URL are dropped, so a URL is never in two queues and
/// is never processed twice.
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs to crawl, keyed by depth (1-based)
    queues: BTreeMap<u32, Vec<String>>,

    /// URLs fully processed
    visited: HashSet<String>,

    /// URLs sitting in a queue and not yet settled
    pending: HashSet<String>,

    /// URLs whose fetch failed, only kept when failures are not retried
    failed: HashSet<String>,

    /// Whether a failed URL may be queued again when rediscovered
    retry_failed: bool,
}

impl Frontier {
    /// Creates a frontier with `seed` as the only URL at depth 1
    pub fn new(seed: &str) -> Self {
        let mut frontier = Self {
            retry_failed: true,
            ..Self::default()
        };
        frontier.seed(seed);
        frontier
    }

    /// Sets whether failed URLs may be queued again
    pub fn with_retry_failed(mut self, retry_failed: bool) -> Self {
        self.retry_failed = retry_failed;
        self
    }

    /// Places `url` in the depth 1 queue without marking it visited
    ///
    /// The seed is queued in canonical form so that links back to it are
    /// recognised as duplicates. A seed that does not parse is queued as
    /// given and fails when it is processed.
    pub fn seed(&mut self, url: &str) {
        match canonical_url(url) {
            Ok(canonical) => self.offer(&canonical, 1),
            Err(e) => {
                tracing::warn!("Seed kept as given: {}", e);
                self.offer(url, 1)
            }
        };
    }

    /// Returns the queue for `depth`, empty if that depth has none
    pub fn current_queue(&self, depth: u32) -> &[String] {
        self.queues.get(&depth).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Creates the (empty) queue for `depth + 1`
    ///
    /// Must be called before the URLs of `depth` are processed.
    pub fn prepare_next_queue(&mut self, depth: u32) {
        self.queues.insert(depth + 1, Vec::new());
    }

    /// Schedules `url` at `depth` unless it is visited or already queued
    ///
    /// # Returns
    ///
    /// `true` if the URL was queued, `false` if it was dropped as a duplicate
    pub fn offer(&mut self, url: &str, depth: u32) -> bool {
        if self.visited.contains(url) || self.pending.contains(url) || self.failed.contains(url)
        {
            return false;
        }

        self.pending.insert(url.to_string());
        self.queues.entry(depth).or_default().push(url.to_string());
        true
    }

    /// Records that `url` was processed successfully
    pub fn mark_visited(&mut self, url: &str) {
        self.pending.remove(url);
        if !self.visited.insert(url.to_string()) {
            tracing::warn!("{} was marked visited twice", url);
        }
    }

    /// Records that `url` could not be processed
    ///
    /// The URL is not visited. Depending on the retry policy it may be queued
    /// again if another page links to it.
    pub fn mark_failed(&mut self, url: &str) {
        self.pending.remove(url);
        if !self.retry_failed {
            self.failed.insert(url.to_string());
        }
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    /// Returns the number of visited URLs
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns the number of queued URLs not yet settled
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
