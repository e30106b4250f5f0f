//! Storage traits and error types
//!
//! This module defines the trait interface for page stores and
//! associated error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Nothing stored at {0}")]
    NotFound(PathBuf),

    #[error("Could not create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for page store implementations
///
/// A location is a path-like key. Reading a location that was never
/// written must fail with [`StorageError::NotFound`] so callers can tell a
/// gap apart from an empty page.
pub trait PageStore {
    /// Stores `content` at `location`, replacing anything already there
    fn write(&mut self, location: &Path, content: &str) -> StorageResult<()>;

    /// Reads the content stored at `location`
    fn read(&self, location: &Path) -> StorageResult<String>;

    /// Removes whatever is stored at `location`
    ///
    /// Removing a location that holds nothing succeeds.
    fn remove(&mut self, location: &Path) -> StorageResult<()>;

    /// Returns true if something is stored at `location`
    fn exists(&self, location: &Path) -> bool {
        self.read(location).is_ok()
    }
}
