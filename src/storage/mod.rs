//! Key/value persistence port.
//!
//! The variable and history stores persist through [`KeyValueStore`], a
//! browser-storage-like interface: string keys mapping to string values. The
//! crate ships an in-memory adapter and a JSON file adapter; any other backend
//! can be plugged in by implementing the trait.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::sync::Arc;

/// Errors raised by storage adapters.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium holds data the adapter cannot interpret.
    #[error("Storage format error: {0}")]
    Format(#[from] serde_json::Error),

    /// A lock guarding the adapter's state was poisoned.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A synchronous string key/value store.
///
/// Methods take `&self` so one store can be shared by several consumers;
/// implementations serialize writes internally.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}
