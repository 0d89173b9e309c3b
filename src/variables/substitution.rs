//! Variable substitution engine.
//!
//! Replaces `{{variable}}` tokens in request text with values from a variable
//! list. Substitution is single pass and soft: values are inserted verbatim and
//! never re-scanned, and a token with no matching variable stays in the output
//! exactly as written.

use crate::models::{Header, RequestState, Variable};
use once_cell::sync::Lazy;
use regex::Regex;

/// Cached regex pattern for matching `{{variableName}}`.
///
/// The name is any run of characters other than `}`. There is no nesting and
/// no escape syntax.
static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Failed to compile variable regex"));

/// Substitutes all `{{variable}}` tokens in `text`.
///
/// Tokens are matched left to right without overlap. Each name is looked up
/// with a linear scan of `variables` and the first entry with an exactly equal
/// key wins. Unknown names are left untouched, braces included.
///
/// # Examples
///
/// ```
/// use rest_client_core::models::Variable;
/// use rest_client_core::variables::substitute_variables;
///
/// let variables = vec![
///     Variable::new("apiUrl", "api.example.com"),
///     Variable::new("userId", "42"),
/// ];
///
/// let result = substitute_variables("https://{{apiUrl}}/users/{{userId}}/{{missing}}", &variables);
/// assert_eq!(result, "https://api.example.com/users/42/{{missing}}");
/// ```
pub fn substitute_variables(text: &str, variables: &[Variable]) -> String {
    // Fast path; the general loop below yields the same result.
    if text.is_empty() || variables.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut last_match_end = 0;

    for cap in VARIABLE_REGEX.captures_iter(text) {
        let (Some(full_match), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };

        result.push_str(&text[last_match_end..full_match.start()]);

        match lookup(variables, name.as_str()) {
            Some(value) => result.push_str(value),
            None => result.push_str(full_match.as_str()),
        }

        last_match_end = full_match.end();
    }

    result.push_str(&text[last_match_end..]);
    result
}

fn lookup<'a>(variables: &'a [Variable], name: &str) -> Option<&'a str> {
    variables
        .iter()
        .find(|variable| variable.key == name)
        .map(|variable| variable.value.as_str())
}

/// Returns true if `text` contains at least one `{{...}}` token.
pub fn has_variables(text: &str) -> bool {
    VARIABLE_REGEX.is_match(text)
}

/// Returns the inner names of all tokens in order of appearance.
///
/// Duplicates are kept, so `"{{a}}{{a}}"` yields `["a", "a"]`.
pub fn extract_variable_names(text: &str) -> Vec<String> {
    VARIABLE_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Applies substitution to every templated part of a request.
///
/// The URL, the body, and the key and value of each header are substituted
/// independently. The method is copied as-is and header order is preserved.
pub fn substitute_request(state: &RequestState, variables: &[Variable]) -> RequestState {
    RequestState {
        method: state.method,
        url: substitute_variables(&state.url, variables),
        headers: state
            .headers
            .iter()
            .map(|header| Header {
                key: substitute_variables(&header.key, variables),
                value: substitute_variables(&header.value, variables),
            })
            .collect(),
        body: substitute_variables(&state.body, variables),
    }
}
