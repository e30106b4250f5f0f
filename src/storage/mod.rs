//! Storage module for persisting raw pages
//!
//! This module handles where fetched pages live between a crawl and a replay:
//! - The `PageStore` trait the crawler writes through and the replay reads through
//! - A filesystem store that creates missing parent directories
//! - An in-memory store for embedding and testing
//! - Slot layout helpers mapping page positions to file names

mod fs;
mod memory;
mod traits;

pub use fs::FsPageStore;
pub use memory::MemoryPageStore;
pub use traits::{PageStore, StorageError, StorageResult};

use std::path::{Path, PathBuf};

/// File name of the slot holding the one-based `page`
pub fn slot_file_name(page: u32) -> String {
    format!("page-{:04}.json", page)
}

/// Builds `count` slot locations under `directory`
///
/// Slot `i` holds logical page `i + 1`.
///
/// # Example
///
/// ```
/// use catalog_harvest::storage::slot_paths;
/// use std::path::{Path, PathBuf};
///
/// let slots = slot_paths(Path::new("out"), 2);
/// assert_eq!(slots, vec![PathBuf::from("out/page-0001.json"), PathBuf::from("out/page-0002.json")]);
/// ```
pub fn slot_paths(directory: &Path, count: u32) -> Vec<PathBuf> {
    (1..=count)
        .map(|page| directory.join(slot_file_name(page)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_file_name_is_zero_padded() {
        assert_eq!(slot_file_name(1), "page-0001.json");
        assert_eq!(slot_file_name(123), "page-0123.json");
    }

    #[test]
    fn test_slot_paths_empty() {
        assert!(slot_paths(Path::new("out"), 0).is_empty());
    }
}
