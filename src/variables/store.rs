//! Persistent variable store.
//!
//! Holds the user's variables in most-recently-touched-first order and writes
//! the full list to a [`KeyValueStore`] after every mutation. Placeholder rows
//! created for editing live only in memory until they receive a value.

use crate::config::RestClientConfig;
use crate::models::Variable;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key used when no configuration is supplied.
pub const DEFAULT_VARIABLES_KEY: &str = "rss-variables";

/// Prefix of the keys generated by [`VariableStore::add_placeholder`].
pub const PLACEHOLDER_PREFIX: &str = "empty-";

/// The variable list of one session, bound to a storage backend.
#[derive(Debug)]
pub struct VariableStore<S: KeyValueStore> {
    storage: S,
    storage_key: String,
    variables: Vec<Variable>,
    placeholder_counter: usize,
}

impl<S: KeyValueStore> VariableStore<S> {
    /// Loads the store from `storage` under the default key.
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, DEFAULT_VARIABLES_KEY)
    }

    /// Loads the store using the storage key from `config`.
    pub fn from_config(storage: S, config: &RestClientConfig) -> Self {
        Self::load_with_key(storage, &config.variables_storage_key)
    }

    /// Loads the store from `storage` under `storage_key`.
    ///
    /// A missing key yields an empty list. Unreadable storage or malformed
    /// JSON is logged and also yields an empty list.
    pub fn load_with_key(storage: S, storage_key: &str) -> Self {
        let variables = read_variables(&storage, storage_key);
        log::debug!(
            "Loaded {} variables from '{}'",
            variables.len(),
            storage_key
        );

        Self {
            storage,
            storage_key: storage_key.to_string(),
            variables,
            placeholder_counter: 0,
        }
    }

    /// Current variables, most recently touched first.
    pub fn list(&self) -> &[Variable] {
        &self.variables
    }

    /// Looks up a variable's value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.key == key)
            .map(|v| v.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Inserts or replaces `key`, moving it to the front, then persists.
    ///
    /// Every empty-valued entry is dropped before saving, so upserting an
    /// empty value removes the key, and pending placeholders are discarded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written. The in-memory
    /// list is updated regardless.
    pub fn upsert(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut updated = Vec::with_capacity(self.variables.len() + 1);
        updated.push(Variable::new(key, value));
        updated.extend(self.variables.drain(..).filter(|v| v.key != key));
        updated.retain(|v| !v.is_empty());
        self.variables = updated;

        log::debug!("Upserted variable '{}'", key);
        self.persist()
    }

    /// Removes `key` and persists. Removing an unknown key still rewrites
    /// the stored list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    pub fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.variables.retain(|v| v.key != key);

        log::debug!("Removed variable '{}'", key);
        self.persist()
    }

    /// Adds an empty `empty-<n>` row at the front and returns its key.
    ///
    /// The counter starts at 0 and is not persisted. Nothing is written to
    /// storage until the row is saved with a value through [`upsert`].
    ///
    /// [`upsert`]: VariableStore::upsert
    pub fn add_placeholder(&mut self) -> String {
        let key = format!("{}{}", PLACEHOLDER_PREFIX, self.placeholder_counter);
        self.placeholder_counter += 1;
        self.variables.insert(0, Variable::new(key.clone(), ""));
        key
    }

    /// Consumes the store and returns its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&self) -> Result<(), StorageError> {
        let persisted: Vec<&Variable> = self.variables.iter().filter(|v| !v.is_empty()).collect();
        let json = serde_json::to_string(&persisted)?;
        self.storage.set_item(&self.storage_key, &json)
    }
}

fn read_variables<S: KeyValueStore>(storage: &S, key: &str) -> Vec<Variable> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Failed to read variables from '{}': {}", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(variables) => variables,
        Err(e) => {
            log::warn!("Ignoring corrupted variables under '{}': {}", key, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn stored(storage: &MemoryStorage) -> Vec<Variable> {
        let raw = storage.get_item(DEFAULT_VARIABLES_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let storage = MemoryStorage::new();
        let store = VariableStore::load(&storage);
        assert!(store.is_empty());
        assert!(storage.get_item(DEFAULT_VARIABLES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_load_existing_list() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                DEFAULT_VARIABLES_KEY,
                r#"[{"key":"host","value":"api.example.com"},{"key":"id","value":"7"}]"#,
            )
            .unwrap();

        let store = VariableStore::load(&storage);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("host"), Some("api.example.com"));
        assert_eq!(store.list()[1].key, "id");
    }

    #[test]
    fn test_load_corrupted_json_recovers() {
        let storage = MemoryStorage::new();
        storage.set_item(DEFAULT_VARIABLES_KEY, "not json").unwrap();

        let store = VariableStore::load(&storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_upsert_moves_to_front_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = VariableStore::load(&storage);

        store.upsert("a", "1").unwrap();
        store.upsert("b", "2").unwrap();
        store.upsert("a", "3").unwrap();

        let keys: Vec<&str> = store.list().iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(store.get("a"), Some("3"));
        assert_eq!(stored(&storage), store.list().to_vec());
    }

    #[test]
    fn test_upsert_empty_value_removes_key() {
        let storage = MemoryStorage::new();
        let mut store = VariableStore::load(&storage);
        store.upsert("k", "v").unwrap();

        store.upsert("k", "").unwrap();

        assert!(store.get("k").is_none());
        assert!(store.list().iter().all(|v| v.key != "k"));
        assert!(stored(&storage).is_empty());
    }

    #[test]
    fn test_remove_persists() {
        let storage = MemoryStorage::new();
        let mut store = VariableStore::load(&storage);
        store.upsert("a", "1").unwrap();
        store.upsert("b", "2").unwrap();

        store.remove("a").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(stored(&storage), vec![Variable::new("b", "2")]);
    }

    #[test]
    fn test_placeholders_are_not_persisted() {
        let storage = MemoryStorage::new();
        let mut store = VariableStore::load(&storage);
        store.upsert("a", "1").unwrap();

        let first = store.add_placeholder();
        let second = store.add_placeholder();

        assert_eq!(first, "empty-0");
        assert_eq!(second, "empty-1");
        assert_eq!(store.list()[0].key, "empty-1");
        assert_eq!(store.len(), 3);
        assert_eq!(stored(&storage), vec![Variable::new("a", "1")]);
    }

    #[test]
    fn test_saving_placeholder_row_discards_it() {
        let storage = MemoryStorage::new();
        let mut store = VariableStore::load(&storage);
        store.add_placeholder();

        store.upsert("token", "abc").unwrap();

        assert_eq!(store.list().to_vec(), vec![Variable::new("token", "abc")]);
    }

    #[test]
    fn test_remove_keeps_placeholders_out_of_storage() {
        let storage = MemoryStorage::new();
        let mut store = VariableStore::load(&storage);
        store.upsert("a", "1").unwrap();
        store.add_placeholder();

        store.remove("a").unwrap();

        assert_eq!(store.len(), 1);
        assert!(stored(&storage).is_empty());
    }

    #[test]
    fn test_placeholder_counter_resets_per_store() {
        let storage = MemoryStorage::new();
        let mut store = VariableStore::load(&storage);
        store.add_placeholder();
        store.upsert("x", "1").unwrap();
        drop(store);

        let mut reloaded = VariableStore::load(&storage);
        assert_eq!(reloaded.add_placeholder(), "empty-0");
    }

    #[test]
    fn test_custom_storage_key_from_config() {
        let storage = MemoryStorage::new();
        let config = RestClientConfig {
            variables_storage_key: "team-vars".to_string(),
            ..Default::default()
        };
        let mut store = VariableStore::from_config(&storage, &config);
        store.upsert("a", "1").unwrap();

        assert!(storage.get_item("team-vars").unwrap().is_some());
        assert!(storage.get_item(DEFAULT_VARIABLES_KEY).unwrap().is_none());
    }
}
