//! Local filesystem Storage implementation for host builds.
//!
//! `LocalFileStorage` implements `platform::Storage` using `std::fs`.
//! Used when the `std` feature is enabled (host tools and tests only).
//! Device paths such as `/data/wlan_profile.json` are resolved relative to
//! the `root` provided at construction.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::storage::{Storage, StorageError};

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::StorageFull => Self::NoSpace,
            _ => Self::Io,
        }
    }
}

/// A `Storage` implementation backed by `std::fs`.
///
/// # Example
/// ```no_run
/// use stick_platform::storage_local::LocalFileStorage;
/// use stick_platform::Storage;
/// let mut storage = LocalFileStorage::new("/tmp/stick");
/// let bytes = storage.read("/data/wlan_profile.json");
/// ```
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Create a new storage rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Storage for LocalFileStorage {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        Ok(fs::read(self.resolve(path))?)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        Ok(fs::write(self.resolve(path), data)?)
    }

    fn exists(&mut self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn create_dir(&mut self, path: &str) -> Result<(), StorageError> {
        Ok(fs::create_dir_all(self.resolve(path))?)
    }
}
