//! End-to-end integration tests for the REST client core
//!
//! These tests walk through complete user workflows: composing a request with
//! variables, sharing it as a link, reopening the link, generating code and
//! sending it through a transport.

use super::{echo_transport, init_test_env};
use rest_client_core::client::RestClient;
use rest_client_core::config::RestClientConfig;
use rest_client_core::models::{Header, HttpMethod, RequestState, Variable};
use rest_client_core::proxy::{handle_proxy_request, ProxyRequest, ProxyResponse, TransportError};
use rest_client_core::route::{decode_route, encode_route};
use rest_client_core::storage::MemoryStorage;
use rest_client_core::variables::substitute_variables;
use serde_json::Value;

type TransportFn = fn(&ProxyRequest) -> Result<ProxyResponse, TransportError>;

fn new_client(storage: &MemoryStorage) -> RestClient<&MemoryStorage, TransportFn> {
    RestClient::with_config(storage, echo_transport as TransportFn, RestClientConfig::default())
}

#[test]
fn test_substitution_scenario() {
    init_test_env();

    let variables = vec![
        Variable::new("apiUrl", "api.example.com"),
        Variable::new("userId", "42"),
        Variable::new("token", "secret123"),
    ];

    assert_eq!(
        substitute_variables("https://{{apiUrl}}/users/{{userId}}?token={{token}}", &variables),
        "https://api.example.com/users/42?token=secret123"
    );
}

#[test]
fn test_share_link_reopens_resolved_request() {
    init_test_env();
    let storage = MemoryStorage::new();

    let mut author = new_client(&storage);
    author.variables_mut().upsert("baseUrl", "https://jsonplaceholder.typicode.com").unwrap();
    author.variables_mut().upsert("token", "t-123").unwrap();
    author.set_method(HttpMethod::POST);
    author.set_url("{{baseUrl}}/posts");
    author.add_header("Authorization", "Bearer {{token}}");
    author.add_header("Content-Type", "application/json");
    author.set_body(r#"{"title":"from a link"}"#);

    let link = author.route();

    let reader_storage = MemoryStorage::new();
    let mut reader = new_client(&reader_storage);
    reader.open_route(&link);

    let opened = reader.request();
    assert_eq!(opened.method, HttpMethod::POST);
    assert_eq!(opened.url, "https://jsonplaceholder.typicode.com/posts");
    assert_eq!(
        opened.headers,
        vec![
            Header::new("Authorization", "Bearer t-123"),
            Header::new("Content-Type", "application/json"),
        ]
    );
    assert_eq!(opened.body, r#"{"title":"from a link"}"#);

    // The reader has no variables, yet the link is self-contained.
    assert_eq!(reader.route(), link);
}

#[test]
fn test_compose_generate_and_send() {
    init_test_env();
    let storage = MemoryStorage::new();
    let mut client = new_client(&storage);

    client.variables_mut().upsert("host", "api.example.com").unwrap();
    client.set_method(HttpMethod::PATCH);
    client.set_url("https://{{host}}/users/1");
    client.add_header("Content-Type", "application/json");
    client.set_body(r#"{ "active": false }"#);

    let code = client.generate_code("go").unwrap();
    assert!(code.contains(r#"http.NewRequest("PATCH", "https://api.example.com/users/1""#));

    let response = client.send().clone();
    assert_eq!(response.status, Some(200));
    assert!(response.is_ok());

    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["method"], "PATCH");
    assert_eq!(echoed["url"], "https://api.example.com/users/1");
    assert_eq!(echoed["body"], r#"{ "active": false }"#);

    let entry = &client.history().entries()[0];
    assert_eq!(entry.url, "https://api.example.com/users/1");
    assert_eq!(
        decode_route(&entry.route()).url,
        "https://api.example.com/users/1"
    );
}

#[test]
fn test_proxy_endpoint_relays_through_transport() {
    init_test_env();

    let payload = serde_json::to_string(&ProxyRequest::from_state(
        &RequestState::new(HttpMethod::DELETE, "https://api.example.com/items/9")
            .with_header("X-Request-Id", "abc"),
    ))
    .unwrap();

    let (status, body) = handle_proxy_request(&(echo_transport as TransportFn), &payload);
    assert_eq!(status, 200);

    let relayed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(relayed["status"], 200);
    assert_eq!(relayed["ok"], true);

    let echoed: Value = serde_json::from_str(relayed["body"].as_str().unwrap()).unwrap();
    assert_eq!(echoed["method"], "DELETE");
    assert_eq!(echoed["headers"][0], "X-Request-Id: abc");
    assert_eq!(echoed["body"], Value::Null);
}

#[test]
fn test_unresolved_tokens_survive_every_path() {
    init_test_env();

    let state = RequestState::new(HttpMethod::GET, "https://api.example.com/{{unknown}}");
    let route = encode_route(&state, &[]);

    assert_eq!(decode_route(&route).url, "https://api.example.com/{{unknown}}");
}
