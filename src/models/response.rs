//! Response display state.
//!
//! The client never surfaces transport failures as errors. Whatever happens
//! during dispatch ends up here, so the view has a single path for rendering
//! results.

use serde::{Deserialize, Serialize};

/// Display marker for a successful (2xx) response.
pub const OK_MARKER: &str = "OK";

/// Display marker for a non-2xx response or a failed dispatch.
pub const ERROR_MARKER: &str = "❌";

/// The response panel's state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseState {
    /// HTTP status code, or `None` when nothing was received.
    pub status: Option<u16>,

    /// Response body as text.
    pub body: String,

    /// `"OK"` or an error glyph. Empty until a request has been sent.
    pub ok: String,
}

impl ResponseState {
    /// State before any request has been sent.
    pub fn pending() -> Self {
        Self::default()
    }

    /// A response received from the transport.
    pub fn received(status: u16, ok: bool, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
            ok: marker(ok).to_string(),
        }
    }

    /// A dispatch that produced no response. The body carries a JSON
    /// `{"error": ...}` document so it renders like any other payload.
    pub fn failed(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            status: None,
            body: serde_json::json!({ "error": message }).to_string(),
            ok: ERROR_MARKER.to_string(),
        }
    }

    /// True once a response (successful or not) has been received.
    pub fn has_response(&self) -> bool {
        self.status.is_some()
    }

    pub fn is_ok(&self) -> bool {
        self.ok == OK_MARKER
    }
}

fn marker(ok: bool) -> &'static str {
    if ok {
        OK_MARKER
    } else {
        ERROR_MARKER
    }
}
