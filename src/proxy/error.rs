//! Request dispatch error types.
//!
//! Transports report failures with [`TransportError`]. None of these reach the
//! user as an error value: the proxy turns them into a 500 payload and the
//! client turns them into response data.

/// Errors that can occur while dispatching a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection failures, DNS resolution errors and other network-level issues.
    #[error("Network error: {0}")]
    Network(String),

    /// The request took longer than the transport allows.
    #[error("Request timed out")]
    Timeout,

    /// The URL could not be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Only HTTP and HTTPS targets can be dispatched.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// Invalid headers, malformed responses and other HTTP-level issues.
    #[error("HTTP protocol error: {0}")]
    Protocol(String),
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        TransportError::InvalidUrl(err.to_string())
    }
}

/// Errors raised while handling a proxy payload.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The payload is not a valid proxy request document.
    #[error("Invalid request payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
