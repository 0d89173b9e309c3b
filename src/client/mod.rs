//! Request composition session.
//!
//! [`RestClient`] owns the request being edited, the last response, and the
//! variable and history stores. Every consumer of the request (the shareable
//! route, generated code, dispatch) substitutes variables on the fly; the
//! edited request keeps its raw `{{tokens}}`.

use crate::codegen::{self, CodeGenError, Language};
use crate::config::{get_config, RestClientConfig};
use crate::history::{HistoryEntry, HistoryStore};
use crate::models::{Header, HttpMethod, RequestState, ResponseState};
use crate::proxy::{dispatch, ProxyRequest, Transport};
use crate::route::{decode_route, encode_route, strip_route_prefix, with_route_prefix};
use crate::storage::KeyValueStore;
use crate::variables::{substitute_request, VariableStore};
use chrono::Utc;

/// One client session.
///
/// The storage handle is cloned into both stores, so pass a shared handle
/// such as `&MemoryStorage` or `Arc<FileStorage>`.
pub struct RestClient<S, T>
where
    S: KeyValueStore + Clone,
    T: Transport,
{
    config: RestClientConfig,
    request: RequestState,
    response: ResponseState,
    variables: VariableStore<S>,
    history: HistoryStore<S>,
    transport: T,
}

impl<S, T> RestClient<S, T>
where
    S: KeyValueStore + Clone,
    T: Transport,
{
    /// Creates a session using the global configuration.
    pub fn new(storage: S, transport: T) -> Self {
        Self::with_config(storage, transport, get_config())
    }

    /// Creates a session with an explicit configuration.
    pub fn with_config(storage: S, transport: T, config: RestClientConfig) -> Self {
        let variables = VariableStore::from_config(storage.clone(), &config);
        let history = HistoryStore::from_config(storage, &config);

        Self {
            config,
            request: RequestState::default(),
            response: ResponseState::pending(),
            variables,
            history,
            transport,
        }
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// The request being edited, with variables unresolved.
    pub fn request(&self) -> &RequestState {
        &self.request
    }

    /// The outcome of the last [`send`](RestClient::send).
    pub fn response(&self) -> &ResponseState {
        &self.response
    }

    pub fn variables(&self) -> &VariableStore<S> {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableStore<S> {
        &mut self.variables
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn set_method(&mut self, method: HttpMethod) {
        self.request.method = method;
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.request.url = url.into();
    }

    pub fn set_headers(&mut self, headers: Vec<Header>) {
        self.request.headers = headers;
    }

    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.request.headers.push(Header::new(key, value));
    }

    /// Replaces the header at `index`. Out-of-range indices are ignored.
    pub fn update_header(&mut self, index: usize, key: impl Into<String>, value: impl Into<String>) {
        if let Some(header) = self.request.headers.get_mut(index) {
            *header = Header::new(key, value);
        }
    }

    /// Removes and returns the header at `index`, if any.
    pub fn remove_header(&mut self, index: usize) -> Option<Header> {
        (index < self.request.headers.len()).then(|| self.request.headers.remove(index))
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.request.body = body.into();
    }

    /// Link for the current request, including the configured prefix.
    ///
    /// Variables are resolved in the link.
    pub fn route(&self) -> String {
        with_route_prefix(
            &self.config.route_prefix,
            &encode_route(&self.request, self.variables.list()),
        )
    }

    /// Replaces the current request with the one encoded in `link`.
    ///
    /// The configured prefix is optional in `link`. Undecodable parts load as
    /// empty fields. The previous response is cleared.
    pub fn open_route(&mut self, link: &str) {
        let route = strip_route_prefix(&self.config.route_prefix, link);
        self.request = decode_route(route);
        self.response = ResponseState::pending();
        log::debug!("Opened {} {} from route", self.request.method, self.request.url);
    }

    /// Renders the current request as code in `language`.
    ///
    /// # Errors
    ///
    /// See [`codegen::generate_code`].
    pub fn generate_code(&self, language: &str) -> Result<String, CodeGenError> {
        codegen::generate_code(&self.request, self.variables.list(), language)
    }

    /// Renders the current request in the configured default language.
    pub fn generate_default_code(&self) -> Result<String, CodeGenError> {
        self.generate_code_for(self.config.language())
    }

    pub fn generate_code_for(&self, language: Language) -> Result<String, CodeGenError> {
        codegen::generate_code_for(&self.request, self.variables.list(), language)
    }

    /// Sends the current request and stores the outcome in [`response`].
    ///
    /// Variables are resolved before dispatch and the resolved request is
    /// recorded in history. Dispatch failures never surface as errors: they
    /// become a response with no status and a JSON `{"error": ...}` body.
    ///
    /// [`response`]: RestClient::response
    pub fn send(&mut self) -> &ResponseState {
        let resolved = substitute_request(&self.request, self.variables.list());
        let proxy_request = ProxyRequest::from_state(&resolved);

        self.response = match dispatch(&self.transport, &proxy_request) {
            Ok(response) => ResponseState::received(response.status, response.ok, response.body),
            Err(e) => {
                log::warn!("Error making request to {}: {}", resolved.url, e);
                ResponseState::failed(e.to_string())
            }
        };

        if let Err(e) = self
            .history
            .add_request(HistoryEntry::from_request(&resolved, Utc::now()))
        {
            log::warn!("Failed to record request in history: {}", e);
        }

        &self.response
    }
}
