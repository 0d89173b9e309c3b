//! Shareable request routes.
//!
//! A request is packed into an address-bar friendly route:
//!
//! ```text
//! /<METHOD>/<base64url(url)>[/<base64url(body)>][?<header>=<value>&...]
//! ```
//!
//! Segment position identifies each field, so the URL segment is always
//! present, even when empty. Headers travel as
//! `application/x-www-form-urlencoded` query parameters. Variables are
//! substituted before encoding; a decoded route therefore carries resolved
//! values, not the original `{{tokens}}`.
//!
//! Decoding never fails. A segment that cannot be decoded becomes an empty
//! string, so a corrupted link opens as an empty request.

pub mod base64url;

use crate::models::{Header, HttpMethod, RequestState, Variable};
use crate::variables::substitute_request;
use url::form_urlencoded;

/// Encodes `state` as a route after substituting `variables`.
///
/// # Examples
///
/// ```
/// use rest_client_core::models::{HttpMethod, RequestState};
/// use rest_client_core::route::encode_route;
///
/// let state = RequestState::new(HttpMethod::GET, "https://jsonplaceholder.typicode.com/posts/1");
/// assert_eq!(
///     encode_route(&state, &[]),
///     "/GET/aHR0cHM6Ly9qc29ucGxhY2Vob2xkZXIudHlwaWNvZGUuY29tL3Bvc3RzLzE"
/// );
/// ```
pub fn encode_route(state: &RequestState, variables: &[Variable]) -> String {
    let substituted = substitute_request(state, variables);

    let mut route = format!(
        "/{}/{}",
        substituted.method.as_str(),
        base64url::encode(&substituted.url)
    );

    if !substituted.body.is_empty() {
        route.push('/');
        route.push_str(&base64url::encode(&substituted.body));
    }

    if !substituted.headers.is_empty() {
        route.push('?');
        route.push_str(&encode_headers(&substituted.headers));
    }

    route
}

/// Serializes headers as a form-urlencoded query string.
///
/// Repeated keys collapse like `URLSearchParams::set`: the key keeps the
/// position of its first occurrence and takes the value of its last.
pub fn encode_headers(headers: &[Header]) -> String {
    let mut params: Vec<(&str, &str)> = Vec::with_capacity(headers.len());
    for header in headers {
        match params.iter_mut().find(|(key, _)| *key == header.key) {
            Some(param) => param.1 = header.value.as_str(),
            None => params.push((header.key.as_str(), header.value.as_str())),
        }
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Parses a form-urlencoded query string into headers, in order.
pub fn decode_headers(query: &str) -> Vec<Header> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .map(|(key, value)| Header::new(key, value))
        .collect()
}

/// Decodes a route produced by [`encode_route`].
///
/// `route` starts at the method segment (`/GET/...`); strip any application
/// prefix first with [`strip_route_prefix`]. Missing segments decode as
/// empty fields and an unknown method falls back to `GET`.
pub fn decode_route(route: &str) -> RequestState {
    let (path, query) = match route.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (route, None),
    };

    let path = path.strip_prefix('/').unwrap_or(path);
    let mut segments = path.split('/');
    let method = segments.next().unwrap_or("");
    let url = segments.next().unwrap_or("");
    let body = segments.next();

    if segments.next().is_some() {
        log::debug!("Ignoring trailing route segments in '{}'", route);
    }

    decode_parts(method, url, body, query)
}

/// Decodes the individual parts of a route, as a router hands them over.
pub fn decode_parts(method: &str, url: &str, body: Option<&str>, query: Option<&str>) -> RequestState {
    let method = HttpMethod::from_str(method).unwrap_or_else(|| {
        if !method.is_empty() {
            log::warn!("Unknown method '{}' in route, using GET", method);
        }
        HttpMethod::GET
    });

    RequestState {
        method,
        url: base64url::decode_or_empty(url),
        headers: query.map(decode_headers).unwrap_or_default(),
        body: body.map(base64url::decode_or_empty).unwrap_or_default(),
    }
}

/// Joins an application prefix (e.g. `/rest-client`) and an encoded route.
pub fn with_route_prefix(prefix: &str, route: &str) -> String {
    format!("{}{}", prefix.trim_end_matches('/'), route)
}

/// Removes an application prefix from a link, leaving the encoded route.
///
/// Links that do not start with the prefix are returned unchanged.
pub fn strip_route_prefix<'a>(prefix: &str, link: &'a str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return link;
    }

    match link.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') => rest,
        _ => link,
    }
}
