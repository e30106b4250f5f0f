//! Crawl reports
//!
//! A report records what happened to every slot a crawl consumed, so gaps in
//! the stored output can be explained later.

use crate::HarvestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What happened to one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SlotOutcome {
    /// The page was fetched and stored
    Written { bytes: usize, documents: usize },

    /// The page could not be fetched; nothing was stored
    FetchFailed { error: String },

    /// The page was fetched but could not be stored
    WriteFailed { error: String },
}

impl SlotOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// One consumed slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotReport {
    /// Zero-based slot index
    pub slot: usize,
    /// One-based page number the slot belongs to
    pub page: u32,
    pub location: PathBuf,
    #[serde(flatten)]
    pub outcome: SlotOutcome,
}

/// Summary of one crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Human-readable form of the search criteria
    pub criteria: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Last total page estimate the crawl worked with
    pub total_pages: u32,
    /// True when the crawl stopped because it ran out of slots
    pub truncated: bool,
    pub slots: Vec<SlotReport>,
}

impl CrawlReport {
    pub fn new(criteria: impl Into<String>) -> Self {
        Self {
            criteria: criteria.into(),
            started_at: Utc::now(),
            finished_at: None,
            total_pages: 0,
            truncated: false,
            slots: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, slot: SlotReport) {
        self.slots.push(slot);
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of pages requested
    pub fn pages_attempted(&self) -> usize {
        self.slots.len()
    }

    /// Number of pages stored
    pub fn pages_written(&self) -> usize {
        self.slots.iter().filter(|s| s.outcome.is_written()).count()
    }

    /// Indexes of the slots that hold a stored page
    pub fn written_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .filter(|s| s.outcome.is_written())
            .map(|s| s.slot)
            .collect()
    }

    /// Locations of every consumed slot, in slot order
    pub fn locations(&self) -> Vec<PathBuf> {
        self.slots.iter().map(|s| s.location.clone()).collect()
    }

    /// Crawl duration, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Writes `report` as pretty JSON, creating the parent directory if needed
pub fn write_report(report: &CrawlReport, path: &Path) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    tracing::info!("Crawl report written to {}", path.display());
    Ok(())
}

/// Loads a report written by [`write_report`]
pub fn load_report(path: &Path) -> Result<CrawlReport, HarvestError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn slot(slot: usize, outcome: SlotOutcome) -> SlotReport {
        SlotReport {
            slot,
            page: slot as u32 + 1,
            location: PathBuf::from(format!("out/{}", slot)),
            outcome,
        }
    }

    #[test]
    fn test_counts() {
        let mut report = CrawlReport::new("q=dune");
        report.record(slot(0, SlotOutcome::FetchFailed { error: "HTTP 500".into() }));
        report.record(slot(1, SlotOutcome::Written { bytes: 10, documents: 2 }));
        report.record(slot(2, SlotOutcome::WriteFailed { error: "disk".into() }));

        assert_eq!(report.pages_attempted(), 3);
        assert_eq!(report.pages_written(), 1);
        assert_eq!(report.written_slots(), vec![1]);
        assert_eq!(report.locations().len(), 3);
        assert_eq!(report.duration_seconds(), None);

        report.finish();
        assert!(report.duration_seconds().is_some());
    }

    #[test]
    fn test_serialized_shape() {
        let mut report = CrawlReport::new("author=Borges");
        report.record(slot(0, SlotOutcome::Written { bytes: 3, documents: 1 }));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["slots"][0]["outcome"], "written");
        assert_eq!(value["slots"][0]["documents"], 1);
        assert_eq!(value["slots"][0]["page"], 1);

        let back: CrawlReport = serde_json::from_value(value).unwrap();
        assert_eq!(back.slots, report.slots);
    }

    #[test]
    fn test_write_and_load_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports/crawl-report.json");

        let mut report = CrawlReport::new("q=dune");
        report.total_pages = 2;
        report.record(slot(0, SlotOutcome::Written { bytes: 12, documents: 3 }));
        report.record(slot(1, SlotOutcome::FetchFailed { error: "HTTP 503".into() }));
        report.finish();

        write_report(&report, &path).unwrap();
        let loaded = load_report(&path).unwrap();

        assert_eq!(loaded.criteria, "q=dune");
        assert_eq!(loaded.total_pages, 2);
        assert_eq!(loaded.slots, report.slots);
        assert_eq!(loaded.finished_at, report.finished_at);
    }

    #[test]
    fn test_load_missing_report() {
        let dir = TempDir::new().unwrap();
        let result = load_report(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(HarvestError::Io(_))));
    }
}
