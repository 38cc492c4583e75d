//! Storage abstraction for persisted settings
//!
//! Settings files are small, so the trait works on whole files: read
//! everything, or replace everything.

use alloc::vec::Vec;

/// Storage trait for file system access
pub trait Storage {
    /// Read the whole file at `path`.
    fn read(&mut self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or truncate the file at `path` and write `data` to it.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Check if path exists
    fn exists(&mut self, path: &str) -> bool;

    /// Create a directory; succeeds if it already exists.
    fn create_dir(&mut self, path: &str) -> Result<(), StorageError>;
}

/// Storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No file at the given path
    NotFound,
    /// Read or write failed
    Io,
    /// Flash is full
    NoSpace,
}

impl core::error::Error for StorageError {}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "File not found"),
            Self::Io => write!(f, "Storage I/O error"),
            Self::NoSpace => write!(f, "Storage full"),
        }
    }
}
