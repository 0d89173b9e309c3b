//! Persistence integration tests
//!
//! Variables and history share one storage backend under separate keys. These
//! tests use the JSON file adapter so state survives across sessions.

use super::{echo_transport, init_test_env};
use rest_client_core::client::RestClient;
use rest_client_core::config::{load_config, reset_config, RestClientConfig};
use rest_client_core::history::HistoryStore;
use rest_client_core::models::{HttpMethod, Variable};
use rest_client_core::proxy::{ProxyRequest, ProxyResponse, TransportError};
use rest_client_core::storage::{FileStorage, KeyValueStore};
use rest_client_core::variables::VariableStore;
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;
use tempfile::TempDir;

type TransportFn = fn(&ProxyRequest) -> Result<ProxyResponse, TransportError>;

fn open_storage(dir: &TempDir) -> Arc<FileStorage> {
    Arc::new(FileStorage::open(dir.path().join("storage.json")).unwrap())
}

#[test]
fn test_variables_survive_restart() {
    init_test_env();
    let dir = TempDir::new().unwrap();

    {
        let mut store = VariableStore::load(open_storage(&dir));
        store.upsert("token", "abc").unwrap();
        store.upsert("host", "api.example.com").unwrap();
        store.add_placeholder();
    }

    let store = VariableStore::load(open_storage(&dir));
    assert_eq!(
        store.list().to_vec(),
        vec![
            Variable::new("host", "api.example.com"),
            Variable::new("token", "abc"),
        ]
    );
}

#[test]
fn test_upsert_empty_value_removes_from_disk() {
    init_test_env();
    let dir = TempDir::new().unwrap();

    let mut store = VariableStore::load(open_storage(&dir));
    store.upsert("k", "v").unwrap();
    store.upsert("k", "").unwrap();
    assert!(store.list().iter().all(|v| v.key != "k"));

    let storage = open_storage(&dir);
    assert_eq!(storage.get_item("rss-variables").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_sessions_share_storage_under_separate_keys() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);

    {
        let mut client = RestClient::with_config(
            Arc::clone(&storage),
            echo_transport as TransportFn,
            RestClientConfig::default(),
        );
        client.variables_mut().upsert("id", "7").unwrap();
        client.set_method(HttpMethod::GET);
        client.set_url("https://api.example.com/users/{{id}}");
        client.send();
        client.set_url("https://api.example.com/users/{{id}}/posts");
        client.send();
    }

    let reopened = open_storage(&dir);
    let history = HistoryStore::load(Arc::clone(&reopened));
    let urls: Vec<&str> = history.entries().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://api.example.com/users/7/posts",
            "https://api.example.com/users/7",
        ]
    );

    let variables = VariableStore::load(reopened);
    assert_eq!(variables.get("id"), Some("7"));
}

#[test]
#[serial]
fn test_global_config_drives_new_sessions() {
    init_test_env();
    let dir = TempDir::new().unwrap();

    load_config(Some(json!({
        "rest-client": {
            "variablesStorageKey": "vars",
            "historyStorageKey": "requests",
            "historyLimit": 1,
            "routePrefix": "/share"
        }
    })))
    .unwrap();

    let storage = open_storage(&dir);
    let mut client = RestClient::new(Arc::clone(&storage), echo_transport as TransportFn);
    client.variables_mut().upsert("a", "1").unwrap();
    client.set_url("https://x.test/one");
    client.send();
    client.set_url("https://x.test/two");
    client.send();

    assert!(client.route().starts_with("/share/GET/"));
    assert_eq!(client.history().len(), 1);
    assert!(storage.get_item("vars").unwrap().is_some());
    assert!(storage.get_item("requests").unwrap().is_some());
    assert!(storage.get_item("rss-variables").unwrap().is_none());

    reset_config();
}
