//! Catalog-Harvest: a fault-tolerant paginated catalog crawler
//!
//! This crate walks every page of a search against a paginated catalog API,
//! stores each raw page in its positional slot, and later replays the stored
//! pages into an ingestion sink while counting the records accepted.

pub mod config;
pub mod crawler;
pub mod page;
pub mod query;
pub mod replay;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Catalog-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search criteria produce no request parameters")]
    EmptyCriteria,

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("Crawl exceeded its deadline of {seconds}s")]
    Deadline { seconds: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Catalog-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOptions, CrawlReport, Crawler, Fetcher, HttpFetcher};
pub use page::{Document, PageResult, DEFAULT_PAGE_SIZE};
pub use query::{QueryCursor, SearchCriteria};
pub use replay::{replay, CountingSink, IngestSink, ReplaySummary};
pub use state::CrawlState;
pub use storage::{FsPageStore, PageStore};
