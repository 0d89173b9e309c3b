//! Server-side request relay.
//!
//! Browsers cannot call arbitrary origins, so the client posts the request it
//! wants to make to a proxy endpoint which dispatches it and relays the
//! result. The endpoint's input and output are JSON documents:
//!
//! ```text
//! request:  { "url": "...", "method": "POST", "headers": { "name": "value" }, "body": "..." }
//! success:  { "status": 201, "ok": true, "body": "..." }
//! failure:  { "error": "Failed to make request: ..." }   (HTTP 500)
//! ```
//!
//! The network call itself sits behind the [`Transport`] trait.

pub mod error;

pub use error::{ProxyError, TransportError};

use crate::models::request::{deserialize_method, header_map};
use crate::models::{Header, HttpMethod, RequestState};
use serde::{Deserialize, Serialize};

/// HTTP status returned by the proxy endpoint when dispatch fails.
pub const PROXY_FAILURE_STATUS: u16 = 500;

/// A request to be dispatched, as posted to the proxy endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRequest {
    pub url: String,

    #[serde(default, deserialize_with = "deserialize_method")]
    pub method: HttpMethod,

    #[serde(default, with = "header_map")]
    pub headers: Vec<Header>,

    /// Request body; absent or empty means no body is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ProxyRequest {
    /// Builds the dispatch payload for an already substituted request.
    pub fn from_state(state: &RequestState) -> Self {
        Self {
            url: state.url.clone(),
            method: state.method,
            headers: state.headers.clone(),
            body: state.has_body().then(|| state.body.clone()),
        }
    }

    /// The body to send, treating an empty string as no body.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }

    /// Parses and checks the target URL.
    ///
    /// # Errors
    ///
    /// * `TransportError::InvalidUrl` if the URL does not parse
    /// * `TransportError::UnsupportedProtocol` for schemes other than http/https
    pub fn parsed_url(&self) -> Result<url::Url, TransportError> {
        let url = url::Url::parse(&self.url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(TransportError::UnsupportedProtocol(other.to_string())),
        }
    }
}

/// The relayed outcome of a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResponse {
    pub status: u16,

    /// True for 2xx statuses.
    pub ok: bool,

    pub body: String,
}

impl ProxyResponse {
    /// Builds a response, deriving `ok` from the status.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            ok: (200..300).contains(&status),
            body: body.into(),
        }
    }
}

/// Performs the network call for a [`ProxyRequest`].
///
/// Any non-transport outcome, including 4xx and 5xx statuses, is a
/// successful [`ProxyResponse`].
pub trait Transport: Send + Sync {
    fn execute(&self, request: &ProxyRequest) -> Result<ProxyResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&ProxyRequest) -> Result<ProxyResponse, TransportError> + Send + Sync,
{
    fn execute(&self, request: &ProxyRequest) -> Result<ProxyResponse, TransportError> {
        self(request)
    }
}

/// Dispatches a request, validating its URL before handing it to `transport`.
///
/// # Errors
///
/// Returns `TransportError` if the URL is invalid or the transport fails.
pub fn dispatch<T: Transport + ?Sized>(
    transport: &T,
    request: &ProxyRequest,
) -> Result<ProxyResponse, TransportError> {
    request.parsed_url()?;

    log::debug!("Dispatching {} {}", request.method, request.url);
    let response = transport.execute(request)?;
    log::debug!("{} {} -> {}", request.method, request.url, response.status);

    Ok(response)
}

/// Handles one proxy call: parses `payload`, dispatches it and serializes
/// the outcome.
///
/// Returns the HTTP status for the proxy's own response together with its
/// JSON body. A dispatched request always yields 200 with `{status, ok, body}`
/// whatever the upstream status; a malformed payload or a transport failure
/// yields 500 with `{"error": "Failed to make request: ..."}`.
pub fn handle_proxy_request<T: Transport + ?Sized>(transport: &T, payload: &str) -> (u16, String) {
    match relay(transport, payload) {
        Ok(response) => match serde_json::to_string(&response) {
            Ok(body) => (200, body),
            Err(e) => failure(&ProxyError::Payload(e)),
        },
        Err(e) => failure(&e),
    }
}

fn relay<T: Transport + ?Sized>(transport: &T, payload: &str) -> Result<ProxyResponse, ProxyError> {
    let request: ProxyRequest = serde_json::from_str(payload)?;
    Ok(dispatch(transport, &request)?)
}

fn failure(err: &ProxyError) -> (u16, String) {
    log::warn!("Proxy request failed: {}", err);
    let body = serde_json::json!({ "error": format!("Failed to make request: {}", err) });
    (PROXY_FAILURE_STATUS, body.to_string())
}
