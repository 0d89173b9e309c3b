//! Code generation module for HTTP requests.
//!
//! This module renders the request being composed as a runnable snippet in one
//! of eight client flavours. Variables are substituted first, so the snippet
//! carries resolved values. Request bodies must be JSON; they are minified and
//! handed to the templates, which embed them in the form their language
//! expects.

pub mod csharp;
pub mod curl;
pub mod go;
pub mod java;
pub mod javascript;
pub mod python;

use crate::models::{Header, HttpMethod, RequestState, Variable};
use crate::variables::substitute_request;
use std::fmt;
use std::str::FromStr;

/// Supported code generation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// cURL command line
    Curl,
    /// Browser fetch() API
    JavaScript,
    /// Browser XMLHttpRequest
    Xhr,
    /// Node.js `https` module
    NodeJs,
    /// Python `requests`
    Python,
    /// Java 11+ `java.net.http.HttpClient`
    Java,
    /// C# `HttpClient`
    CSharp,
    /// Go `net/http`
    Go,
}

impl Language {
    /// Returns the identifier accepted by [`generate_code`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Curl => "curl",
            Language::JavaScript => "javascript",
            Language::Xhr => "xhr",
            Language::NodeJs => "nodejs",
            Language::Python => "python",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Go => "go",
        }
    }

    /// Returns the human readable name shown in a language picker.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Curl => "cURL",
            Language::JavaScript => "JavaScript (Fetch)",
            Language::Xhr => "JavaScript (XHR)",
            Language::NodeJs => "Node.js",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Go => "Go",
        }
    }

    /// Returns all available languages, in picker order.
    pub fn all() -> Vec<Language> {
        vec![
            Language::Curl,
            Language::JavaScript,
            Language::Xhr,
            Language::NodeJs,
            Language::Python,
            Language::Java,
            Language::CSharp,
            Language::Go,
        ]
    }

    fn render(&self, params: &TemplateParams) -> String {
        match self {
            Language::Curl => curl::generate_curl_code(params),
            Language::JavaScript => javascript::generate_fetch_code(params),
            Language::Xhr => javascript::generate_xhr_code(params),
            Language::NodeJs => javascript::generate_nodejs_code(params),
            Language::Python => python::generate_requests_code(params),
            Language::Java => java::generate_http_client_code(params),
            Language::CSharp => csharp::generate_http_client_code(params),
            Language::Go => go::generate_net_http_code(params),
        }
    }
}

impl FromStr for Language {
    type Err = CodeGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::all()
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| CodeGenError::UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during code generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeGenError {
    /// The requested language is not one of the supported targets
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    /// The substituted request body is not valid JSON
    #[error("Invalid JSON in request body: {0}")]
    InvalidBody(String),
}

/// Values handed to a language template.
///
/// `url` and header keys/values are already escaped for a double-quoted
/// string literal. `body` is minified JSON text, `None` when the request has
/// no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParams {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Option<String>,
}

/// Generates client code for the request in the given language.
///
/// This is the main entry point for code generation. `language` is one of
/// the identifiers returned by [`Language::as_str`].
///
/// # Errors
///
/// * `CodeGenError::InvalidBody` if the substituted body is present but not JSON
/// * `CodeGenError::UnsupportedLanguage` if `language` is unknown
///
/// # Examples
///
/// ```
/// use rest_client_core::codegen::generate_code;
/// use rest_client_core::models::{HttpMethod, RequestState, Variable};
///
/// let state = RequestState::new(HttpMethod::GET, "https://{{host}}/users")
///     .with_header("Accept", "application/json");
/// let variables = vec![Variable::new("host", "api.example.com")];
///
/// let code = generate_code(&state, &variables, "curl").unwrap();
/// assert!(code.starts_with("curl -X GET \"https://api.example.com/users\""));
/// ```
pub fn generate_code(
    state: &RequestState,
    variables: &[Variable],
    language: &str,
) -> Result<String, CodeGenError> {
    let params = prepare_params(state, variables)?;
    let language: Language = language.parse()?;

    log::debug!("Generating {} code for {} request", language, params.method);
    Ok(language.render(&params))
}

/// Generates client code for an already resolved [`Language`].
pub fn generate_code_for(
    state: &RequestState,
    variables: &[Variable],
    language: Language,
) -> Result<String, CodeGenError> {
    let params = prepare_params(state, variables)?;
    Ok(language.render(&params))
}

fn prepare_params(state: &RequestState, variables: &[Variable]) -> Result<TemplateParams, CodeGenError> {
    let substituted = substitute_request(state, variables);

    if substituted.has_body() {
        validate_json(&substituted.body)?;
    }

    Ok(TemplateParams {
        method: substituted.method,
        url: escape_string(&substituted.url),
        headers: substituted
            .headers
            .iter()
            .map(|h| Header::new(escape_string(&h.key), escape_string(&h.value)))
            .collect(),
        body: substituted
            .has_body()
            .then(|| format_json(&substituted.body)),
    })
}

/// Escapes text for a double-quoted string literal.
///
/// Handles backslash, double quote, newline, carriage return and tab, the
/// subset shared by every target language.
pub fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Minifies a JSON document, returning the input unchanged if it does not parse.
pub fn format_json(json: &str) -> String {
    serde_json::from_str::<serde_json::Value>(json)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| json.to_string())
}

/// Checks that `json` is a JSON document.
pub fn validate_json(json: &str) -> Result<(), CodeGenError> {
    serde_json::from_str::<serde_json::Value>(json)
        .map(|_| ())
        .map_err(|e| CodeGenError::InvalidBody(e.to_string()))
}
