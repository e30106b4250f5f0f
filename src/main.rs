//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the Catalog-Harvest crawler.

use anyhow::Context;
use catalog_harvest::config::{load_config_with_hash, Config};
use catalog_harvest::crawler::run_crawl;
use catalog_harvest::query::QueryCursor;
use catalog_harvest::replay::{replay, stored_locations, CountingSink};
use catalog_harvest::storage::FsPageStore;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a fault-tolerant paginated catalog crawler
///
/// Catalog-Harvest walks every page of a catalog search, stores each raw
/// page in its own slot file, and can later replay the stored pages to
/// count the records they hold.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version)]
#[command(about = "A fault-tolerant paginated catalog crawler", long_about = None)]
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

    /// Validate config and show the first request without fetching anything
    #[arg(long, conflicts_with = "replay")]
    dry_run: bool,

    /// Replay stored pages and count their records instead of crawling
    #[arg(long, conflicts_with = "dry_run")]
    replay: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.replay {
        handle_replay(&config)?;
    } else {
        handle_crawl(&config).await?;
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
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows the configuration and first request
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Harvest Dry Run ===\n");

    println!("Catalog:");
    println!("  Endpoint: {}", config.catalog.endpoint);
    println!("  Page size: {}", config.catalog.page_size);
    println!("  Request timeout: {}s", config.catalog.timeout_secs);
    match config.catalog.crawl_deadline_secs {
        Some(secs) => println!("  Crawl deadline: {}s", secs),
        None => println!("  Crawl deadline: none"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Max pages: {}", config.output.max_pages);
    println!("  Report: {}", config.output.report_path().display());

    let criteria = config.search.criteria();
    println!("\nSearch: {}", criteria);

    let mut cursor = QueryCursor::new(&config.catalog.endpoint, criteria);
    if let Some(target) = cursor.next_target() {
        println!("  First request: {}", target);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --replay mode: counts the records in stored pages
fn handle_replay(config: &Config) -> anyhow::Result<()> {
    let locations = stored_locations(&config.output).with_context(|| {
        format!(
            "Failed to list stored pages in {}",
            config.output.directory
        )
    })?;
    tracing::info!("Replaying {} stored pages", locations.len());

    let mut sink = CountingSink::new();
    let summary = replay(&FsPageStore::new(), &locations, &mut sink);

    println!("Records: {}", summary.records);
    println!("Pages read: {}", summary.pages_read);
    println!("Records with an author: {}", sink.with_author());
    if !summary.missing.is_empty() {
        println!("Missing pages ({}):", summary.missing.len());
        for location in &summary.missing {
            println!("  - {}", location.display());
        }
    }
    if !summary.unreadable.is_empty() {
        println!("Unreadable pages ({}):", summary.unreadable.len());
        for location in &summary.unreadable {
            println!("  - {}", location.display());
        }
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} for {} (up to {} pages)",
        config.catalog.endpoint,
        config.search.criteria(),
        config.output.max_pages
    );

    let report = run_crawl(config).await.context("Crawl failed")?;

    println!(
        "Stored {} of {} pages ({} attempted) in {}",
        report.pages_written(),
        report.total_pages,
        report.pages_attempted(),
        config.output.directory
    );
    if report.truncated {
        println!("Stopped early: raise output.max-pages to fetch the remaining pages");
    }

    Ok(())
}
