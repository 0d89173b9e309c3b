//! Integration tests module for the REST client core
//!
//! This module provides common utilities and test infrastructure
//! for the end-to-end and persistence tests.

pub mod end_to_end_test;
pub mod persistence_test;

use rest_client_core::proxy::{ProxyRequest, ProxyResponse, TransportError};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A transport that answers every request with a JSON echo of what it received.
pub fn echo_transport(request: &ProxyRequest) -> Result<ProxyResponse, TransportError> {
    let echo = serde_json::json!({
        "method": request.method.as_str(),
        "url": request.url,
        "headers": request
            .headers
            .iter()
            .map(|h| format!("{}: {}", h.key, h.value))
            .collect::<Vec<_>>(),
        "body": request.body(),
    });
    Ok(ProxyResponse::new(200, echo.to_string()))
}
