//! Data models for request history.
//!
//! A history entry is the request that was dispatched plus the time it was
//! sent. Entries are stored as a JSON array; the field names match the
//! stored format (`executionTime` in milliseconds since the Unix epoch).

use crate::models::request::header_map;
use crate::models::{Header, HttpMethod, RequestState};
use crate::route::{encode_route, with_route_prefix};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single entry in the request history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Request URL as sent, with variables resolved.
    pub url: String,

    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,

    /// Request body; omitted when the request had none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Request headers as a `{"name": "value"}` object; omitted when empty.
    #[serde(
        default,
        with = "header_map::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub headers: Option<Vec<Header>>,

    /// Dispatch time in milliseconds since the Unix epoch.
    ///
    /// Entries written without a time load as 0 and sort last.
    #[serde(default)]
    pub execution_time: i64,
}

impl HistoryEntry {
    /// Creates an entry for `state` dispatched at `executed_at`.
    ///
    /// An empty body or header list is recorded as absent.
    pub fn from_request(state: &RequestState, executed_at: DateTime<Utc>) -> Self {
        Self {
            url: state.url.clone(),
            method: state.method,
            body: state.has_body().then(|| state.body.clone()),
            headers: (!state.headers.is_empty()).then(|| state.headers.clone()),
            execution_time: executed_at.timestamp_millis(),
        }
    }

    /// Rebuilds the request state this entry was recorded from.
    pub fn to_request(&self) -> RequestState {
        RequestState {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone().unwrap_or_default(),
            body: self.body.clone().unwrap_or_default(),
        }
    }

    /// Dispatch time, or `None` if the stored value is out of range.
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.execution_time)
    }

    /// Encoded route that reopens this request, without an application prefix.
    pub fn route(&self) -> String {
        encode_route(&self.to_request(), &[])
    }

    /// Link that reopens this request under `prefix` (e.g. `/rest-client`).
    pub fn link(&self, prefix: &str) -> String {
        with_route_prefix(prefix, &self.route())
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.executed_at() {
            Some(at) => write!(
                f,
                "[{}] {} {}",
                at.format("%Y-%m-%d %H:%M:%S"),
                self.method,
                self.url
            ),
            None => write!(f, "{} {}", self.method, self.url),
        }
    }
}
