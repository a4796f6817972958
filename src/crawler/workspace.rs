//! Webpages directory setup
//!
//! The webpages directory holds the cached pages of a run and its report.

use crate::config::{CrawlerConfig, DEFAULT_WEBPAGES_DIR};
use crate::CrawlError;
use std::path::{Path, PathBuf};

/// Resolves, creates and (optionally) cleans the webpages directory
///
/// A configured directory that does not exist is ignored in favour of the
/// default one, with a warning. Only regular files are removed when
/// cleaning; subdirectories are left alone.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The directory to cache pages and write the report in
/// * `Err(CrawlError)` - The directory could not be created or cleaned
pub fn prepare_webpages_dir(config: &CrawlerConfig) -> Result<PathBuf, CrawlError> {
    let dir = resolve_webpages_dir(&config.webpages_dir);

    std::fs::create_dir_all(&dir)?;

    if config.clean_webpages_dir {
        let removed = clean_dir(&dir)?;
        if removed > 0 {
            tracing::debug!("Removed {} stale files from {}", removed, dir.display());
        }
    }

    tracing::debug!("Webpages dir: {}", dir.display());
    Ok(dir)
}

fn resolve_webpages_dir(configured: &str) -> PathBuf {
    let configured_path = Path::new(configured);

    if configured == DEFAULT_WEBPAGES_DIR || configured_path.is_dir() {
        return configured_path.to_path_buf();
    }

    tracing::warn!(
        "Custom path for webpages_dir ({}) does not exist - using default ({})",
        configured,
        DEFAULT_WEBPAGES_DIR
    );
    PathBuf::from(DEFAULT_WEBPAGES_DIR)
}

fn clean_dir(dir: &Path) -> Result<usize, CrawlError> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
