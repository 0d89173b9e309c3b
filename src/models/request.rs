//! HTTP request data models.
//!
//! This module defines the request state edited by the client: the method,
//! the raw (unsubstituted) URL, the ordered header list and the body text.

use serde::{Deserialize, Serialize};

/// HTTP request method.
///
/// Only the methods offered by the client's method selector are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    #[default]
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
}

impl HttpMethod {
    /// Every method, in selector order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::HEAD,
        HttpMethod::OPTIONS,
    ];

    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// Matching is case-insensitive.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a valid HTTP method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single request header.
///
/// Headers are kept as an ordered list rather than a map: order matters for
/// display and for deterministic code generation, and duplicate keys are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The request currently being composed.
///
/// `url`, `headers` and `body` hold raw text that may still contain
/// `{{variable}}` tokens. Substitution is applied at each consumption point
/// (dispatch, route encoding, code generation) and never written back here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestState {
    /// HTTP method.
    pub method: HttpMethod,

    /// Target URL, possibly containing `{{variableName}}` tokens.
    pub url: String,

    /// Ordered request headers.
    pub headers: Vec<Header>,

    /// Request body. Empty means "no body".
    pub body: String,
}

impl RequestState {
    /// Creates a request with no headers and no body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Appends a header, keeping insertion order.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// Serializes an ordered header list as a JSON object (`{"key": "value"}`).
///
/// The wire formats (proxy payload, history entries) carry headers as a record.
/// Object member order is preserved in both directions; a repeated key is
/// written twice and read back as two headers.
pub(crate) mod header_map {
    use super::Header;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(headers: &[Header], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(headers.len()))?;
        for header in headers {
            map.serialize_entry(&header.key, &header.value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Header>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HeaderMapVisitor;

        impl<'de> Visitor<'de> for HeaderMapVisitor {
            type Value = Vec<Header>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of header names to string values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut headers = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    headers.push(Header { key, value });
                }
                Ok(headers)
            }
        }

        deserializer.deserialize_map(HeaderMapVisitor)
    }

    /// `Option<Vec<Header>>` variant for optional record fields.
    pub mod option {
        use super::Header;
        use serde::{Deserialize, Deserializer, Serializer};

        #[derive(Deserialize)]
        struct Wrapped(#[serde(deserialize_with = "super::deserialize")] Vec<Header>);

        pub fn serialize<S>(headers: &Option<Vec<Header>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match headers {
                Some(headers) => super::serialize(headers, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Header>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(headers)| headers))
        }
    }
}

/// Reads an [`HttpMethod`] through [`HttpMethod::from_str`], so `"post"` and
/// `"POST"` are the same method.
pub(crate) fn deserialize_method<'de, D>(deserializer: D) -> Result<HttpMethod, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    HttpMethod::from_str(&name)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown HTTP method '{}'", name)))
}
