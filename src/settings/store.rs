//! Durable key-value storage for settings
//!
//! `JsonFileStore` keeps string values in one JSON object on disk, mirroring
//! a browser's local storage. `MemoryStore` holds the same data in memory
//! for tests and ephemeral sessions.

use crate::config::StorageConfig;
use crate::error::{Result, TaxwiseError};
use anyhow::Context;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name used inside the platform configuration directory
pub const STORE_FILE_NAME: &str = "settings.json";

/// A string-keyed store of string values
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Key-value store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store in the user's configuration directory
    ///
    /// # Errors
    ///
    /// Returns a storage error if the configuration directory cannot be
    /// determined or created
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "taxwise", "taxwise").ok_or_else(|| {
            TaxwiseError::Storage("Could not determine configuration directory".into())
        })?;
        Self::new_with_path(proj_dirs.config_dir().join(STORE_FILE_NAME))
    }

    /// Create the store named by `config`, or the default one
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::new_with_path(path),
            None => Self::new(),
        }
    }

    /// Create a store that uses the specified file
    ///
    /// Nothing touches the disk until the first `set` or `remove`, which
    /// creates the parent directory if needed. Reading a store whose file
    /// cannot exist yields no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::settings::{JsonFileStore, KeyValueStore};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = JsonFileStore::new_with_path(dir.path().join("store.json")).unwrap();
    /// store.set("greeting", "hello").unwrap();
    /// assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        Ok(Self { path: path.into() })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .context("Failed to read settings store")
            .map_err(|e| TaxwiseError::Storage(e.to_string()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            TaxwiseError::Storage(format!(
                "Settings store {} is not a JSON object of strings: {}",
                self.path.display(),
                e
            ))
            .into()
        })
    }

    /// Read the map for a write; an unreadable file is replaced
    fn read_for_write(&self) -> BTreeMap<String, String> {
        self.read_all().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable settings store: {}", e);
            BTreeMap::new()
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create parent directory for settings store")
                    .map_err(|e| TaxwiseError::Storage(e.to_string()))?;
            }
        }
        let json = serde_json::to_string_pretty(entries).map_err(TaxwiseError::Serialization)?;
        std::fs::write(&self.path, json)
            .context("Failed to write settings store")
            .map_err(|e| TaxwiseError::Storage(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "Settings store written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_for_write();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_for_write();
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}
