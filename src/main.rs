//! Coachmap main entry point
//!
//! This is the command-line interface for the Coachmap directory scraper.

use clap::Parser;
use coachmap::config::load_config_with_hash;
use coachmap::crawler::crawl;
use coachmap::sink::load_store;
use coachmap::WorkQueue;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Coachmap: a resumable coach-directory scraper
///
/// Coachmap scrapes professional-coach directory sites into a CSV export
/// and a JSON record store. Discovered profile URLs are tracked in a
/// crash-safe work queue, so an interrupted run picks up where it left off.
#[derive(Parser, Debug)]
#[command(name = "coachmap")]
#[command(version = "0.1.0")]
#[command(about = "A resumable coach-directory scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without scraping
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show queue and store statistics and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("coachmap=info,warn"),
            1 => EnvFilter::new("coachmap=debug,info"),
            2 => EnvFilter::new("coachmap=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &coachmap::Config) {
    println!("=== Coachmap Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Max retries: {}", config.scraper.max_retries);
    println!("  Retry backoff: {}ms", config.scraper.retry_backoff_ms);
    println!("  Failure policy: {:?}", config.scraper.failure_policy);
    println!("  Request timeout: {}ms", config.scraper.request_timeout_ms);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.scraper_name);
    println!("  Version: {}", config.user_agent.scraper_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nDirectory:");
    println!("  Listing URL: {}", config.directory.listing_url);
    println!(
        "  Profile link selector: {}",
        config.directory.profile_link_selector
    );
    println!("  Name selector: {}", config.directory.name_selector);

    println!("\nOutput:");
    println!("  Queue: {}", config.output.queue_path);
    println!("  CSV: {}", config.output.csv_path);
    println!("  Store: {}", config.output.store_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows queue and store statistics
fn handle_stats(config: &coachmap::Config) -> anyhow::Result<()> {
    let queue = WorkQueue::open(&config.output.queue_path)?;
    let records = load_store(Path::new(&config.output.store_path))?;

    println!("Queue: {}", config.output.queue_path);
    if queue.is_initialized() {
        println!("  Pending items: {}", queue.len());
    } else {
        println!("  Not initialized (no previous run)");
    }

    println!("Store: {}", config.output.store_path);
    println!("  Records: {}", records.len());

    Ok(())
}

/// Handles the main scrape operation
async fn handle_crawl(config: coachmap::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Scraping {} (will resume if interrupted run exists)",
        config.directory.listing_url
    );

    match crawl(config).await {
        Ok(stats) => {
            tracing::info!(
                "Scrape completed: {} processed, {} skipped, {} rejected",
                stats.processed,
                stats.skipped,
                stats.rejected
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
