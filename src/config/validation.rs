use crate::config::types::{Config, CrawlerConfig, FetcherConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    Ok(())
}

/// Validates traversal and output configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.webpages_dir.is_empty() {
        return Err(ConfigError::Validation(
            "webpages_dir cannot be empty".to_string(),
        ));
    }

    validate_results_file(&config.results_file)?;

    for prefix in &config.filtered_prefixes {
        if prefix.is_empty() {
            return Err(ConfigError::Validation(
                "filtered_prefixes cannot contain an empty prefix".to_string(),
            ));
        }
    }

    Ok(())
}

/// The results file is a bare name placed inside the webpages directory
fn validate_results_file(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "results_file cannot be empty".to_string(),
        ));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "results_file must be a plain file name, got '{}'",
            name
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
