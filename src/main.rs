//! Locality Crawler main entry point
//!
//! This is the command-line interface for the bounded-depth crawler.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use locality_crawler::config::{load_config_or_default, Config};
use locality_crawler::crawler::run_crawl;
use locality_crawler::output::print_statistics;
use locality_crawler::CrawlError;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Exit code for invalid arguments and an unreachable seed
const EXIT_INVALID_ARGS: i32 = -1;

/// Locality Crawler: a bounded-depth web crawler
///
/// Crawls the web from a URL up to the given depth and writes a tab separated
/// report ranking every page by the share of its links that stay on its host.
#[derive(Parser, Debug)]
#[command(name = "locality-crawler")]
#[command(version)]
#[command(about = "Crawls the web for a given URL and depth and ranks page locality", long_about = None)]
struct Cli {
    /// The url to start crawling from (https:// is added when missing)
    #[arg(value_name = "URL")]
    url: String,

    /// The crawling depth (0 and up)
    #[arg(value_name = "DEPTH", allow_negative_numbers = true)]
    depth: i64,

    /// Path to the optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "cfg.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_cli();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_config_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    match config_hash {
        Some(hash) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            cli.config.display(),
            hash
        ),
        None => tracing::info!("No configuration file found, using defaults"),
    }

    let depth = match u32::try_from(cli.depth) {
        Ok(depth) => depth,
        Err(_) => {
            tracing::error!("provided depth ({}) must be positive (0 and up)", cli.depth);
            process::exit(EXIT_INVALID_ARGS);
        }
    };

    handle_crawl(&cli.url, depth, &config).await
}

/// Parses arguments, exiting with [`EXIT_INVALID_ARGS`] on usage errors
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage has not been routed through tracing yet
            let _ = e.print();
            process::exit(EXIT_INVALID_ARGS);
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("locality_crawler=info,warn"),
            1 => EnvFilter::new("locality_crawler=debug,info"),
            2 => EnvFilter::new("locality_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the main crawl operation
async fn handle_crawl(url: &str, depth: u32, config: &Config) -> anyhow::Result<()> {
    let outcome = match run_crawl(url, depth, config).await {
        Ok(outcome) => outcome,
        Err(e @ (CrawlError::UrlError(_) | CrawlError::UnreachableSeed { .. })) => {
            tracing::error!("provided url is not valid - {}", e);
            process::exit(EXIT_INVALID_ARGS);
        }
        Err(e) => return Err(e).context("Crawl failed"),
    };

    outcome.results.print_summary();

    println!();
    print_statistics(&outcome.statistics);

    Ok(())
}
