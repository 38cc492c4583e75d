//! Persisted settings.
//!
//! A flat JSON object of string keys and string values, read once at boot
//! and rewritten whole on change. A missing or unreadable file is an empty
//! record, not an error.
//!
//! Only keys that were in the file at load time are ever written back.
//! A key seen for the first time is kept in memory and dropped on reboot,
//! even when a later write to a stored key rewrites the file. Keys the
//! firmware always needs are seeded at load time (see
//! [`ConfigStore::load_with_defaults`]) and count as stored, so their first
//! write persists.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;

use stick_platform::{Storage, StorageError};

/// Station SSID key.
pub const KEY_SSID: &str = "ssid";
/// Station password key.
pub const KEY_PASSWORD: &str = "password";

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Storage rejected the write.
    #[error("settings storage: {0}")]
    Storage(#[from] StorageError),
    /// Record could not be serialized.
    #[error("settings record could not be encoded")]
    Encode,
}

/// In-memory copy of the settings record plus its backing file.
pub struct ConfigStore<S> {
    storage: S,
    path: &'static str,
    record: BTreeMap<String, String>,
    stored: BTreeSet<String>,
}

impl<S: Storage> ConfigStore<S> {
    /// Load the record at `path`.
    pub fn load(storage: S, path: &'static str) -> Self {
        Self::load_with_defaults(storage, path, &[])
    }

    /// Load the record at `path`, then add any `defaults` key it lacks.
    /// Defaults are written with the rest of the record on the first write.
    pub fn load_with_defaults(mut storage: S, path: &'static str, defaults: &[(&str, &str)]) -> Self {
        let mut record = match storage.read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                warn!("Settings file {} is not a valid record, starting empty", path);
                BTreeMap::new()
            }),
            Err(StorageError::NotFound) => {
                info!("No settings file at {}", path);
                BTreeMap::new()
            }
            Err(_) => {
                warn!("Settings file {} unreadable, starting empty", path);
                BTreeMap::new()
            }
        };
        for (key, value) in defaults {
            record
                .entry(String::from(*key))
                .or_insert_with(|| String::from(*value));
        }
        let stored = record.keys().cloned().collect();
        Self {
            storage,
            path,
            record,
            stored,
        }
    }

    /// Value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.record.get(key).map(String::as_str)
    }

    /// Number of keys in memory
    pub fn len(&self) -> usize {
        self.record.len()
    }

    /// True when no key is set
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Update `key`. The record is written back only if `key` is a stored
    /// key; otherwise the value is kept in memory only.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_many(&[(key, value)])
    }

    /// Update several keys, then write the record back once if any of them
    /// is a stored key.
    pub fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), ConfigError> {
        let mut dirty = false;
        for (key, value) in entries {
            self.record.insert(String::from(*key), String::from(*value));
            if self.stored.contains(*key) {
                dirty = true;
            } else {
                debug!("Settings key {} is new, not persisted", *key);
            }
        }
        if dirty {
            self.persist()
        } else {
            Ok(())
        }
    }

    /// Backing storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Release the backing storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Result<(), ConfigError> {
        let on_disk: BTreeMap<&str, &str> = self
            .record
            .iter()
            .filter(|(key, _)| self.stored.contains(key.as_str()))
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        let bytes = serde_json::to_vec(&on_disk).map_err(|_| ConfigError::Encode)?;
        if let Some((folder, _)) = self.path.rsplit_once('/') {
            if !folder.is_empty() && !self.storage.exists(folder) {
                self.storage.create_dir(folder)?;
            }
        }
        self.storage.write(self.path, &bytes).inspect_err(|_| {
            warn!("Could not write settings to {}", self.path);
        })?;
        Ok(())
    }
}
