//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a missing file simply
//! yields [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use locality_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cfg.toml")).unwrap();
//! println!("Pages are cached in: {}", config.crawler.webpages_dir);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetcherConfig, DEFAULT_RESULTS_FILE, DEFAULT_WEBPAGES_DIR,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_or_default, load_config_with_hash};
