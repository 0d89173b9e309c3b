//! Persistent storage for request history.
//!
//! The history is a JSON array of [`HistoryEntry`] under a single storage key,
//! most recent first. Every recorded request rewrites the array and the oldest
//! entries beyond the configured limit are dropped.

use super::models::HistoryEntry;
use crate::config::RestClientConfig;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key used when no configuration is supplied.
pub const DEFAULT_HISTORY_KEY: &str = "rss-history";

/// Default maximum number of history entries to retain.
pub const DEFAULT_MAX_HISTORY_ENTRIES: usize = 1000;

/// The request history of one session, bound to a storage backend.
#[derive(Debug)]
pub struct HistoryStore<S: KeyValueStore> {
    storage: S,
    storage_key: String,
    max_entries: usize,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Loads the history from `storage` under the default key and limit.
    pub fn load(storage: S) -> Self {
        Self::load_with(storage, DEFAULT_HISTORY_KEY, DEFAULT_MAX_HISTORY_ENTRIES)
    }

    /// Loads the history using the storage key and limit from `config`.
    pub fn from_config(storage: S, config: &RestClientConfig) -> Self {
        Self::load_with(storage, &config.history_storage_key, config.history_limit)
    }

    /// Loads the history, newest first.
    ///
    /// Entries are sorted by `executionTime` descending; the sort is stable,
    /// so entries with equal times keep their stored order. Missing or
    /// malformed data yields an empty history and a warning.
    pub fn load_with(storage: S, storage_key: &str, max_entries: usize) -> Self {
        let mut entries = read_entries(&storage, storage_key);
        entries.sort_by(|a, b| b.execution_time.cmp(&a.execution_time));

        log::debug!(
            "Loaded {} history entries from '{}'",
            entries.len(),
            storage_key
        );

        Self {
            storage,
            storage_key: storage_key.to_string(),
            max_entries: max_entries.max(1),
            entries,
        }
    }

    /// History entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `entry` as the most recent request and persists the history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be written. The
    /// in-memory history is updated regardless.
    pub fn add_request(&mut self, entry: HistoryEntry) -> Result<(), StorageError> {
        log::debug!("Recording {} {} in history", entry.method, entry.url);

        self.entries.insert(0, entry);
        if self.entries.len() > self.max_entries {
            let dropped = self.entries.len() - self.max_entries;
            self.entries.truncate(self.max_entries);
            log::debug!("Dropped {} history entries over the limit", dropped);
        }

        self.persist()
    }

    /// Removes every entry and persists the empty history.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.persist()
    }

    /// Consumes the store and returns its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.entries)?;
        self.storage.set_item(&self.storage_key, &json)
    }
}

fn read_entries<S: KeyValueStore>(storage: &S, key: &str) -> Vec<HistoryEntry> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Failed to read history from '{}': {}", key, e);
            return Vec::new();
        }
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("Ignoring corrupted history under '{}': {}", key, e);
            return Vec::new();
        }
    };

    // One unreadable entry must not cost the rest of the history.
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<HistoryEntry>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping history entry {} under '{}': {}", index, key, e);
                None
            }
        })
        .collect()
}
