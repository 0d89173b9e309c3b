//! JavaScript code generation for HTTP requests.
//!
//! This module provides code generators for the browser fetch() API, the
//! browser XMLHttpRequest object and the Node.js `https` module. JSON bodies
//! are valid JavaScript expressions, so they are embedded as object literals
//! and serialized with `JSON.stringify` at runtime.

use super::TemplateParams;
use crate::models::Header;

/// Generates JavaScript code using the browser fetch() API.
///
/// The `body` field is `null` when the request has no body.
pub fn generate_fetch_code(params: &TemplateParams) -> String {
    let mut code = String::new();

    code.push_str(&format!("fetch(\"{}\", {{\n", params.url));
    code.push_str(&format!("  method: \"{}\",\n", params.method));
    code.push_str("  headers: {\n");
    code.push_str(&object_entries(&params.headers, "    "));
    code.push_str("  },\n");

    match &params.body {
        Some(body) => code.push_str(&format!("  body: JSON.stringify({})\n", body)),
        None => code.push_str("  body: null\n"),
    }

    code.push_str("})\n");
    code.push_str("  .then(response => response.json())\n");
    code.push_str("  .then(data => console.log(data))\n");
    code.push_str("  .catch(error => console.error(error));");

    code
}

/// Generates JavaScript code using XMLHttpRequest.
pub fn generate_xhr_code(params: &TemplateParams) -> String {
    let mut code = String::new();

    code.push_str("const xhr = new XMLHttpRequest();\n");
    code.push_str(&format!("xhr.open(\"{}\", \"{}\");\n", params.method, params.url));

    for header in &params.headers {
        code.push_str(&format!(
            "xhr.setRequestHeader(\"{}\", \"{}\");\n",
            header.key, header.value
        ));
    }

    code.push_str("xhr.onload = function() {\n");
    code.push_str("  if (xhr.status >= 200 && xhr.status < 300) {\n");
    code.push_str("    console.log(JSON.parse(xhr.responseText));\n");
    code.push_str("  } else {\n");
    code.push_str("    console.error(xhr.statusText);\n");
    code.push_str("  }\n");
    code.push_str("};\n");
    code.push_str("xhr.onerror = function() {\n");
    code.push_str("  console.error(xhr.statusText);\n");
    code.push_str("};\n");

    match &params.body {
        Some(body) => code.push_str(&format!("xhr.send(JSON.stringify({}));", body)),
        None => code.push_str("xhr.send();"),
    }

    code
}

/// Generates Node.js code using the built-in `https` module.
pub fn generate_nodejs_code(params: &TemplateParams) -> String {
    let mut code = String::new();

    code.push_str("const https = require('https');\n\n");
    code.push_str("const options = {\n");
    code.push_str(&format!("  method: \"{}\",\n", params.method));
    code.push_str("  headers: {\n");
    code.push_str(&object_entries(&params.headers, "    "));
    code.push_str("  }\n");
    code.push_str("};\n\n");

    code.push_str(&format!(
        "const req = https.request(\"{}\", options, (res) => {{\n",
        params.url
    ));
    code.push_str("  let data = '';\n");
    code.push_str("  res.on('data', (chunk) => {\n");
    code.push_str("    data += chunk;\n");
    code.push_str("  });\n");
    code.push_str("  res.on('end', () => {\n");
    code.push_str("    console.log(JSON.parse(data));\n");
    code.push_str("  });\n");
    code.push_str("});\n\n");
    code.push_str("req.on('error', (error) => {\n");
    code.push_str("  console.error(error);\n");
    code.push_str("});\n\n");

    if let Some(body) = &params.body {
        code.push_str(&format!("req.write(JSON.stringify({}));\n", body));
    }
    code.push_str("req.end();");

    code
}

/// Renders `"key": "value"` object members, one per line.
fn object_entries(headers: &[Header], indent: &str) -> String {
    let entries: Vec<String> = headers
        .iter()
        .map(|h| format!("{}\"{}\": \"{}\"", indent, h.key, h.value))
        .collect();

    if entries.is_empty() {
        String::new()
    } else {
        format!("{}\n", entries.join(",\n"))
    }
}
