//! Crawler module for paginated catalog fetching
//!
//! This module contains the crawling side of the system, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - The page loop that stores each page in its slot
//! - Crawl reports describing every consumed slot

mod coordinator;
mod fetcher;
mod report;

pub use coordinator::{CrawlOptions, Crawler};
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher, DEFAULT_TIMEOUT};
pub use report::{load_report, write_report, CrawlReport, SlotOutcome, SlotReport};

use crate::config::Config;
use crate::query::QueryCursor;
use crate::storage::{slot_paths, FsPageStore, PageStore};
use crate::HarvestError;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Lay out one output slot per allowed page under the output directory
/// 3. Clear the previous report and slot files, so every file left afterwards
///    belongs to this crawl
/// 4. Walk every page of the configured search, storing each one
/// 5. Write the crawl report next to the pages
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; failed pages are listed in the report
/// * `Err(HarvestError)` - Crawl could not start, hit its deadline, or the report could not be written
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, HarvestError> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.catalog.timeout())?;
    let cursor = QueryCursor::new(&config.catalog.endpoint, config.search.criteria());
    let slots = slot_paths(Path::new(&config.output.directory), config.output.max_pages);
    let options = CrawlOptions {
        page_size: config.catalog.page_size,
    };

    if cursor.criteria().is_empty() {
        return Err(HarvestError::EmptyCriteria);
    }

    let mut store = FsPageStore::new();
    store.remove(&config.output.report_path())?;
    for location in &slots {
        store.remove(location)?;
    }

    let mut crawler = Crawler::new(fetcher, store, options);
    let report = match config.catalog.crawl_deadline() {
        Some(deadline) => crawler.run_with_deadline(cursor, &slots, deadline).await?,
        None => crawler.run(cursor, &slots).await?,
    };

    write_report(&report, &config.output.report_path())?;
    Ok(report)
}
