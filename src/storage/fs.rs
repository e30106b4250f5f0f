//! Filesystem-backed page store

use crate::storage::traits::{PageStore, StorageError, StorageResult};
use std::io::ErrorKind;
use std::path::Path;

/// Stores each page as a file at its location
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPageStore;

impl FsPageStore {
    pub fn new() -> Self {
        Self
    }
}

impl PageStore for FsPageStore {
    fn write(&mut self, location: &Path, content: &str) -> StorageResult<()> {
        if let Some(parent) = location.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(location, content).map_err(|source| StorageError::Io {
            path: location.to_path_buf(),
            source,
        })?;

        tracing::debug!("Stored {} bytes at {}", content.len(), location.display());
        Ok(())
    }

    fn read(&self, location: &Path) -> StorageResult<String> {
        std::fs::read_to_string(location).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StorageError::NotFound(location.to_path_buf()),
            _ => StorageError::Io {
                path: location.to_path_buf(),
                source,
            },
        })
    }

    fn remove(&mut self, location: &Path) -> StorageResult<()> {
        match std::fs::remove_file(location) {
            Ok(()) => {
                tracing::debug!("Removed stale page at {}", location.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: location.to_path_buf(),
                source,
            }),
        }
    }

    fn exists(&self, location: &Path) -> bool {
        location.is_file()
    }
}
