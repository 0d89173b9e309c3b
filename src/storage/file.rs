//! JSON file storage adapter.
//!
//! All keys live in a single JSON object written to disk on every
//! `set_item`. The file is small (two keys in normal use), so it is rewritten
//! whole through a temporary file and renamed into place.

use super::{KeyValueStore, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name used under the default storage directory.
pub const DEFAULT_STORAGE_FILE: &str = "storage.json";

/// A [`KeyValueStore`] persisted as a JSON object on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens (or prepares to create) the storage file at `path`.
    ///
    /// A missing file starts empty. A file that is not a JSON object of
    /// strings is logged and treated as empty; it is overwritten on the next
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            parse_items(&path, &contents)
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    /// Opens the storage file in the user's configuration directory.
    ///
    /// Uses `~/.config/rest-client/storage.json` on Unix-like systems, or the
    /// roaming application data directory on Windows.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the home directory cannot be determined
    /// or the directory cannot be created.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(default_storage_path()?)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_items(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(items)?;

        // Write to a temporary file first
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, json) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        // Atomically replace the old file with the new one
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        let mut updated = items.clone();
        updated.insert(key.to_string(), value.to_string());
        self.write_items(&updated)?;
        *items = updated;
        Ok(())
    }
}

fn parse_items(path: &Path, contents: &str) -> BTreeMap<String, String> {
    if contents.trim().is_empty() {
        return BTreeMap::new();
    }

    match serde_json::from_str(contents) {
        Ok(items) => items,
        Err(e) => {
            log::warn!(
                "Ignoring corrupted storage file {}: {}",
                path.display(),
                e
            );
            BTreeMap::new()
        }
    }
}

/// Gets the default storage file path, creating its directory if needed.
pub fn default_storage_path() -> Result<PathBuf, StorageError> {
    let config_dir = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config")
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        PathBuf::from(user_profile).join("AppData").join("Roaming")
    } else {
        return Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )));
    };

    let storage_dir = config_dir.join("rest-client");
    if !storage_dir.exists() {
        fs::create_dir_all(&storage_dir)?;
    }

    Ok(storage_dir.join(DEFAULT_STORAGE_FILE))
}
