//! Request history tracking and persistence.
//!
//! Every dispatched request is recorded with the time it was sent, so users
//! can review past requests and reopen them through their encoded route.
//!
//! # Example
//!
//! ```
//! use rest_client_core::history::{HistoryEntry, HistoryStore};
//! use rest_client_core::models::{HttpMethod, RequestState};
//! use rest_client_core::storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let mut history = HistoryStore::load(&storage);
//!
//! let state = RequestState::new(HttpMethod::GET, "https://api.example.com/users");
//! history
//!     .add_request(HistoryEntry::from_request(&state, chrono::Utc::now()))
//!     .unwrap();
//!
//! assert_eq!(history.entries()[0].url, "https://api.example.com/users");
//! ```

pub mod models;
pub mod storage;

pub use models::HistoryEntry;
pub use storage::{HistoryStore, DEFAULT_HISTORY_KEY, DEFAULT_MAX_HISTORY_ENTRIES};
