//! Crawler coordinator - the paginated fetch-and-store loop
//!
//! The loop walks one search page by page:
//! - the first successful response tells it how many pages exist
//! - every iteration consumes exactly one output slot, so slot `i` always
//!   belongs to page `i + 1` and a missing slot marks a failed page
//! - a failed page is skipped and the crawl carries on with the last known
//!   page count

use crate::crawler::report::{CrawlReport, SlotOutcome, SlotReport};
use crate::crawler::Fetcher;
use crate::page::{PageResult, DEFAULT_PAGE_SIZE};
use crate::query::QueryCursor;
use crate::state::{CrawlMachine, CrawlState};
use crate::storage::PageStore;
use crate::HarvestError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Page count assumed when the very first page cannot be fetched, so
/// discovery gets a second attempt
const FIRST_PAGE_FAILURE_ESTIMATE: u32 = 2;

/// Tunables for one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Documents per catalog page, used to turn `num_docs` into a page count
    pub page_size: u32,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Drives a fetcher and a page store across all pages of one search
pub struct Crawler<F, S> {
    fetcher: F,
    store: S,
    options: CrawlOptions,
}

impl<F: Fetcher, S: PageStore> Crawler<F, S> {
    pub fn new(fetcher: F, store: S, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            store,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs the crawl, writing page `i + 1` to `slots[i]`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl finished; individual pages may have failed
    /// * `Err(HarvestError::EmptyCriteria)` - The cursor cannot build any request
    pub async fn run(
        &mut self,
        mut cursor: QueryCursor,
        slots: &[PathBuf],
    ) -> Result<CrawlReport, HarvestError> {
        if cursor.criteria().is_empty() {
            return Err(HarvestError::EmptyCriteria);
        }

        let mut report = CrawlReport::new(cursor.criteria().to_string());
        tracing::info!(
            "Starting crawl for {} against {}",
            report.criteria,
            cursor.endpoint()
        );

        if slots.is_empty() {
            tracing::warn!("No output slots available, nothing to crawl");
            report.truncated = true;
            report.finish();
            return Ok(report);
        }

        let mut machine = CrawlMachine::new();
        let mut total_pages: u32 = 1;
        let mut slot = 0usize;

        loop {
            machine.transition(CrawlState::FetchingPage)?;
            let target = cursor.next_target().ok_or(HarvestError::EmptyCriteria)?;
            let page = cursor.current_page();
            let location = &slots[slot];
            tracing::debug!("Fetching page {} (slot {}): {}", page, slot, target);

            let outcome = match self.fetcher.fetch(&target).await {
                Ok(body) => {
                    machine.transition(CrawlState::WritingPage)?;
                    let result = PageResult::new(body, self.options.page_size);
                    total_pages = result.total_pages();

                    match self.store.write(location, result.content()) {
                        Ok(()) => SlotOutcome::Written {
                            bytes: result.content().len(),
                            documents: result.documents().len(),
                        },
                        Err(e) => {
                            tracing::warn!(kind = "StorageFailure", "Page {} not stored: {}", page, e);
                            self.clear_slot(location);
                            SlotOutcome::WriteFailed {
                                error: e.to_string(),
                            }
                        }
                    }
                }
                Err(e) => {
                    machine.transition(CrawlState::SkippingPage)?;
                    if page == 1 {
                        total_pages = FIRST_PAGE_FAILURE_ESTIMATE;
                    }
                    tracing::debug!("Skipping page {}: {}", page, e);
                    self.clear_slot(location);
                    SlotOutcome::FetchFailed {
                        error: e.to_string(),
                    }
                }
            };

            report.record(SlotReport {
                slot,
                page,
                location: location.clone(),
                outcome,
            });
            report.total_pages = total_pages;

            machine.transition(CrawlState::CheckingTermination)?;

            // An estimate of 0 comes from a page with no documents: nothing
            // lies beyond it.
            if page >= total_pages {
                break;
            }

            slot += 1;
            if slot >= slots.len() {
                tracing::warn!(
                    "Ran out of output slots after page {} of {}",
                    page,
                    total_pages
                );
                report.truncated = true;
                break;
            }
        }

        machine.transition(CrawlState::Done)?;
        report.finish();

        tracing::info!(
            "Crawl finished: {} of {} pages stored ({} attempted)",
            report.pages_written(),
            report.total_pages,
            report.pages_attempted()
        );

        Ok(report)
    }

    /// Drops anything an earlier crawl left in a slot this crawl failed to fill
    fn clear_slot(&mut self, location: &Path) {
        if let Err(e) = self.store.remove(location) {
            tracing::warn!(
                kind = "StorageFailure",
                "Stale page at {} could not be removed: {}",
                location.display(),
                e
            );
        }
    }

    /// Runs the crawl under an overall deadline
    ///
    /// Pages stored before the deadline stay stored.
    pub async fn run_with_deadline(
        &mut self,
        cursor: QueryCursor,
        slots: &[PathBuf],
        deadline: Duration,
    ) -> Result<CrawlReport, HarvestError> {
        match tokio::time::timeout(deadline, self.run(cursor, slots)).await {
            Ok(result) => result,
            Err(_) => Err(HarvestError::Deadline {
                seconds: deadline.as_secs(),
            }),
        }
    }
}
