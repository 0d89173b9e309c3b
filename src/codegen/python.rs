//! Python code generation using the `requests` library.

use super::TemplateParams;
use serde_json::Value;

/// Generates Python code using the requests library.
///
/// The body is converted to a Python literal and passed as `json=`, so
/// `requests` serializes it and sets the JSON content type.
pub fn generate_requests_code(params: &TemplateParams) -> String {
    let mut code = String::new();

    code.push_str("import requests\n\n");
    code.push_str("headers = {\n");
    let entries: Vec<String> = params
        .headers
        .iter()
        .map(|h| format!("    \"{}\": \"{}\"", h.key, h.value))
        .collect();
    if !entries.is_empty() {
        code.push_str(&entries.join(",\n"));
        code.push('\n');
    }
    code.push_str("}\n\n");

    let json_arg = params
        .body
        .as_deref()
        .map(|body| format!(", json={}", python_literal(body)))
        .unwrap_or_default();

    code.push_str(&format!(
        "response = requests.{}(\"{}\", headers=headers{})\n",
        params.method.as_str().to_lowercase(),
        params.url,
        json_arg
    ));
    code.push_str("print(response.json())");

    code
}

/// Converts a JSON document into an equivalent Python expression.
///
/// JSON string escapes are valid in Python string literals; only the
/// keyword literals differ. Text that is not JSON is returned unchanged.
fn python_literal(json: &str) -> String {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => {
            let mut out = String::with_capacity(json.len());
            write_python(&value, &mut out);
            out
        }
        Err(_) => json.to_string(),
    }
}

fn write_python(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&Value::String(s.clone()).to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_python(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push_str(": ");
                write_python(item, out);
            }
            out.push('}');
        }
    }
}
