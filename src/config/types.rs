use crate::page::DEFAULT_PAGE_SIZE;
use crate::query::SearchCriteria;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Catalog-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub search: SearchConfig,
}

/// Remote catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Search endpoint; query parameters are appended to it
    pub endpoint: String,

    /// Documents the catalog returns per page
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Deadline for the whole crawl (seconds); unbounded when absent
    #[serde(rename = "crawl-deadline-secs", default)]
    pub crawl_deadline_secs: Option<u64>,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn crawl_deadline(&self) -> Option<Duration> {
        self.crawl_deadline_secs.map(Duration::from_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory holding one file per page slot
    pub directory: String,

    /// Number of page slots laid out for a crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// File name of the crawl report, relative to `directory`
    #[serde(rename = "report-file", default = "default_report_file")]
    pub report_file: String,
}

impl OutputConfig {
    pub fn report_path(&self) -> PathBuf {
        PathBuf::from(&self.directory).join(&self.report_file)
    }
}

/// What to search for
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Free-text term; wins over author and title
    #[serde(default)]
    pub term: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub title: Option<String>,
}

impl SearchConfig {
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria::new(
            self.author.as_deref(),
            self.title.as_deref(),
            self.term.as_deref(),
        )
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_pages() -> u32 {
    100
}

fn default_report_file() -> String {
    "crawl-report.json".to_string()
}
