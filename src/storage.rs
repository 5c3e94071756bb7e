// SPDX-License-Identifier: MPL-2.0
//! Durable string-keyed storage for client preferences.
//!
//! The switcher only ever touches one slot ([`LANGUAGE_STORAGE_KEY`]): it is
//! read once at startup and written on every language switch.
//!
//! [`LANGUAGE_STORAGE_KEY`]: crate::config::LANGUAGE_STORAGE_KEY

use crate::error::{Error, Result};
use crate::paths;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const STORAGE_FILE: &str = "storage.toml";

/// A string-keyed slot store that survives process restarts.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Storage backed by a flat TOML table on disk.
///
/// Every `set` rewrites the whole file; the table is tiny.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens `storage.toml` in the resolved data directory.
    pub fn open_default() -> Result<Self> {
        Self::open_with_override(None)
    }

    /// Opens `storage.toml` in `base_dir`, or the resolved data directory.
    pub fn open_with_override(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = paths::get_app_data_dir_with_override(base_dir)
            .ok_or_else(|| Error::Io("no data directory available".to_string()))?;
        Self::open(dir.join(STORAGE_FILE))
    }

    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            match read_entries(&path) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "discarding unreadable storage");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    /// The in-memory table only changes once the file has been written.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&updated)?;
        fs::write(&self.path, content)?;
        *entries = updated;
        Ok(())
    }
}

/// Process-local storage, for tests and hosts without a writable disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
