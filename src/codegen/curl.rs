//! cURL command generation.

use super::TemplateParams;

/// Generates a cURL command line.
///
/// Each header becomes a `-H` flag on its own continuation line. The body is
/// passed with `-d` in single quotes and the flag is omitted entirely when the
/// request has no body.
pub fn generate_curl_code(params: &TemplateParams) -> String {
    let mut lines = vec![format!(
        "curl -X {} \"{}\"",
        params.method,
        escape_shell_double_quoted(&params.url)
    )];

    for header in &params.headers {
        lines.push(format!(
            "  -H \"{}: {}\"",
            escape_shell_double_quoted(&header.key),
            escape_shell_double_quoted(&header.value)
        ));
    }

    if let Some(body) = &params.body {
        lines.push(format!("  -d '{}'", escape_shell_single_quoted(body)));
    }

    lines.join(" \\\n")
}

/// Escapes the characters a POSIX shell still expands inside double quotes.
///
/// Input is already string-escaped, so backslashes and quotes are handled.
fn escape_shell_double_quoted(text: &str) -> String {
    text.replace('$', "\\$").replace('`', "\\`")
}

/// Closes and reopens the single-quoted string around each embedded quote.
fn escape_shell_single_quoted(text: &str) -> String {
    text.replace('\'', "'\\''")
}
