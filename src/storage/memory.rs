//! In-memory page store

use crate::storage::traits::{PageStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Keeps pages in memory and remembers the order of writes
#[derive(Debug, Clone, Default)]
pub struct MemoryPageStore {
    pages: HashMap<PathBuf, String>,
    writes: Vec<PathBuf>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locations written so far, in write order (repeats included)
    pub fn writes(&self) -> &[PathBuf] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageStore for MemoryPageStore {
    fn write(&mut self, location: &Path, content: &str) -> StorageResult<()> {
        self.pages
            .insert(location.to_path_buf(), content.to_string());
        self.writes.push(location.to_path_buf());
        Ok(())
    }

    fn read(&self, location: &Path) -> StorageResult<String> {
        self.pages
            .get(location)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(location.to_path_buf()))
    }

    fn remove(&mut self, location: &Path) -> StorageResult<()> {
        self.pages.remove(location);
        Ok(())
    }

    fn exists(&self, location: &Path) -> bool {
        self.pages.contains_key(location)
    }
}
