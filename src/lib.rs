//! Core of a browser-style REST API testing client.
//!
//! This crate holds everything behind the client's editor panes: resolving
//! `{{variable}}` tokens, packing a request into a shareable route, turning a
//! request into runnable code, and persisting the user's variables and
//! request history.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Request, response and variable data structures
//! - **variables**: `{{variable}}` substitution and the persistent variable store
//! - **route**: Encodes requests as `/<METHOD>/<base64url(url)>[/<base64url(body)>]?<headers>`
//! - **codegen**: Code snippets in cURL, JavaScript (fetch/XHR), Node.js, Python, Java, C# and Go
//! - **history**: Recorded requests, newest first, with a configurable limit
//! - **proxy**: JSON relay endpoint and the `Transport` seam for network calls
//! - **client**: A composition session tying the pieces together
//! - **storage**: The key/value persistence port with memory and file adapters
//! - **config**: Global settings (storage keys, history limit, default language)
//!
//! # Data Flow
//!
//! The request being edited keeps its raw `{{tokens}}`. Each consumer runs it
//! through [`variables::substitute_request`] first:
//!
//! ```text
//! RequestState ──substitute──┬─> route::encode_route    (shareable link)
//!                            ├─> codegen::generate_code (code snippet)
//!                            └─> proxy::dispatch        (HTTP transport)
//! ```
//!
//! # Usage
//!
//! ```
//! use rest_client_core::client::RestClient;
//! use rest_client_core::config::RestClientConfig;
//! use rest_client_core::models::HttpMethod;
//! use rest_client_core::proxy::{ProxyRequest, ProxyResponse, TransportError};
//! use rest_client_core::storage::MemoryStorage;
//!
//! let transport = |request: &ProxyRequest| {
//!     Ok::<_, TransportError>(ProxyResponse::new(200, format!("hello from {}", request.url)))
//! };
//! let storage = MemoryStorage::new();
//! let mut client = RestClient::with_config(&storage, transport, RestClientConfig::default());
//!
//! client.variables_mut().upsert("host", "api.example.com").unwrap();
//! client.set_method(HttpMethod::GET);
//! client.set_url("https://{{host}}/users");
//!
//! assert_eq!(client.route(), "/rest-client/GET/aHR0cHM6Ly9hcGkuZXhhbXBsZS5jb20vdXNlcnM");
//! assert!(client.generate_code("python").unwrap().contains("requests.get"));
//! assert_eq!(client.send().status, Some(200));
//! assert_eq!(client.history().len(), 1);
//! ```

pub mod client;
pub mod codegen;
pub mod config;
pub mod history;
pub mod models;
pub mod proxy;
pub mod route;
pub mod storage;
pub mod variables;

pub use client::RestClient;
pub use codegen::{generate_code, CodeGenError, Language};
pub use models::{Header, HttpMethod, RequestState, ResponseState, Variable};
pub use route::{decode_route, encode_route};
pub use variables::{substitute_variables, VariableStore};
