//! Replay of stored pages
//!
//! A replay reads previously stored pages in order, decodes them and folds
//! their documents through an [`IngestSink`], independent of the network.
//! Missing or unreadable pages contribute no documents and never stop the
//! replay; they are listed in the [`ReplaySummary`] instead.

mod sink;

pub use sink::{CountingSink, IngestSink};

use crate::config::OutputConfig;
use crate::crawler::load_report;
use crate::page::PageResult;
use crate::storage::{PageStore, StorageError};
use crate::HarvestError;
use std::path::{Path, PathBuf};

/// Outcome of one replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Sum of what the sink reported as accepted
    pub records: usize,
    /// Locations read successfully
    pub pages_read: usize,
    /// Locations with nothing stored
    pub missing: Vec<PathBuf>,
    /// Locations that exist but could not be read
    pub unreadable: Vec<PathBuf>,
}

/// Replays `locations` in order through `sink`
///
/// # Example
///
/// ```
/// use catalog_harvest::page::Document;
/// use catalog_harvest::replay::replay;
/// use catalog_harvest::storage::{MemoryPageStore, PageStore};
/// use std::path::PathBuf;
///
/// let mut store = MemoryPageStore::new();
/// let location = PathBuf::from("page-0001.json");
/// store.write(&location, r#"{"num_docs": 2, "docs": [{}, {}]}"#).unwrap();
///
/// let summary = replay(&store, &[location], &mut |docs: &[Document]| docs.len());
/// assert_eq!(summary.records, 2);
/// ```
pub fn replay<S, K>(store: &S, locations: &[PathBuf], sink: &mut K) -> ReplaySummary
where
    S: PageStore + ?Sized,
    K: IngestSink + ?Sized,
{
    let mut summary = ReplaySummary::default();

    for location in locations {
        let content = match store.read(location) {
            Ok(content) => {
                summary.pages_read += 1;
                content
            }
            Err(StorageError::NotFound(_)) => {
                tracing::debug!("No page stored at {}", location.display());
                summary.missing.push(location.clone());
                String::new()
            }
            Err(e) => {
                tracing::warn!(kind = "StorageFailure", "{}", e);
                summary.unreadable.push(location.clone());
                String::new()
            }
        };

        let documents = if content.is_empty() {
            Vec::new()
        } else {
            PageResult::with_default_page_size(content).into_documents()
        };

        let accepted = sink.ingest(&documents);
        tracing::trace!(
            "{}: {} documents, {} accepted",
            location.display(),
            documents.len(),
            accepted
        );
        summary.records += accepted;
    }

    tracing::info!(
        "Replay finished: {} records from {} pages ({} missing, {} unreadable)",
        summary.records,
        summary.pages_read,
        summary.missing.len(),
        summary.unreadable.len()
    );

    summary
}

/// Lists the stored page locations of a crawl's output directory
///
/// Uses the crawl report when present, so gaps are replayed as missing.
/// Otherwise falls back to the `page-*.json` files found in the directory,
/// in name order.
pub fn stored_locations(output: &OutputConfig) -> Result<Vec<PathBuf>, HarvestError> {
    let report_path = output.report_path();
    if report_path.is_file() {
        return Ok(load_report(&report_path)?.locations());
    }

    tracing::debug!(
        "No crawl report at {}, scanning directory",
        report_path.display()
    );
    scan_directory(Path::new(&output.directory))
}

fn scan_directory(directory: &Path) -> Result<Vec<PathBuf>, HarvestError> {
    let mut locations = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        let is_page = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("page-") && n.ends_with(".json"));
        if is_page && path.is_file() {
            locations.push(path);
        }
    }
    locations.sort();
    Ok(locations)
}
