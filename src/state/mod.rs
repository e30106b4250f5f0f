//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: The states one paginated crawl moves through
//! - `CrawlMachine`: Holds the current state and rejects illegal transitions

mod crawl_state;

// Re-export main types
pub use crawl_state::{CrawlMachine, CrawlState};
