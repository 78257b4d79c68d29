//! JSON-file key-value store
//!
//! All keys live in one JSON object on disk. Writes go to a sibling temp file
//! that is then renamed over the original, so a crash mid-write leaves the
//! previous contents intact. A file that is not a JSON object of strings is
//! renamed to `<name>.corrupt` and the store starts over empty.

use super::traits::KeyValueStore;
use crate::domain::{Result, TriageError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key-value store backed by a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
    quarantined: Mutex<Option<PathBuf>>,
}

impl FileStore {
    /// Opens (without creating) the store at `path`
    ///
    /// The file is created on first write. Parent directories are created
    /// here, and an existing file that cannot be parsed is moved aside.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                TriageError::Storage(format!(
                    "Failed to create storage directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let store = Self {
            path,
            write_lock: Mutex::new(()),
            quarantined: Mutex::new(None),
        };
        store.read_all()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            TriageError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let aside = self.quarantine()?;
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %e,
                    "Store file is not a JSON object of strings, starting empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    /// Renames the unreadable store file next to itself
    fn quarantine(&self) -> Result<PathBuf> {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".corrupt");
        let aside = self.path.with_file_name(name);

        fs::rename(&self.path, &aside).map_err(|e| {
            TriageError::Storage(format!(
                "Failed to move unreadable store file {} aside: {}",
                self.path.display(),
                e
            ))
        })?;

        if let Ok(mut slot) = self.quarantined.lock() {
            *slot = Some(aside.clone());
        }
        Ok(aside)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json).map_err(|e| {
            TriageError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            TriageError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn modify(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| TriageError::Storage("file store lock poisoned".to_string()))?;

        let mut entries = self.read_all()?;
        f(&mut entries);
        self.write_all(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }

    fn quarantined_file(&self) -> Option<PathBuf> {
        self.quarantined.lock().ok().and_then(|slot| slot.clone())
    }
}
