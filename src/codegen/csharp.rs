//! C# code generation using `System.Net.Http.HttpClient`.
//!
//! The request is built as an `HttpRequestMessage` so any method, including
//! HEAD and OPTIONS, and per-request headers are expressible.

use super::{escape_string, TemplateParams};
use crate::models::HttpMethod;

/// Generates a C# console program that sends the request.
pub fn generate_http_client_code(params: &TemplateParams) -> String {
    let mut code = String::new();

    code.push_str("using System;\n");
    code.push_str("using System.Net.Http;\n");
    code.push_str("using System.Text;\n");
    code.push_str("using System.Threading.Tasks;\n\n");
    code.push_str("class Program\n");
    code.push_str("{\n");
    code.push_str("    static async Task Main()\n");
    code.push_str("    {\n");
    code.push_str("        using var client = new HttpClient();\n");
    code.push_str(&format!(
        "        using var request = new HttpRequestMessage({}, \"{}\");\n",
        method_expression(params.method),
        escape_line_separators(&params.url)
    ));

    for header in &params.headers {
        code.push_str(&format!(
            "        request.Headers.TryAddWithoutValidation(\"{}\", \"{}\");\n",
            escape_line_separators(&header.key),
            escape_line_separators(&header.value)
        ));
    }

    if let Some(body) = &params.body {
        code.push_str(&format!(
            "        request.Content = new StringContent(\"{}\", Encoding.UTF8, \"application/json\");\n",
            escape_line_separators(&escape_string(body))
        ));
    }

    code.push('\n');
    code.push_str("        var response = await client.SendAsync(request);\n");
    code.push_str("        Console.WriteLine(await response.Content.ReadAsStringAsync());\n");
    code.push_str("    }\n");
    code.push('}');

    code
}

/// C# treats U+0085, U+2028 and U+2029 as line terminators, which are not
/// allowed inside a regular string literal.
fn escape_line_separators(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{0085}' => escaped.push_str("\\u0085"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn method_expression(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::GET => "HttpMethod.Get",
        HttpMethod::POST => "HttpMethod.Post",
        HttpMethod::PUT => "HttpMethod.Put",
        HttpMethod::DELETE => "HttpMethod.Delete",
        HttpMethod::PATCH => "HttpMethod.Patch",
        HttpMethod::HEAD => "HttpMethod.Head",
        HttpMethod::OPTIONS => "HttpMethod.Options",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Header;

    #[test]
    fn test_csharp_post() {
        let params = TemplateParams {
            method: HttpMethod::POST,
            url: "https://api.example.com/users".to_string(),
            headers: vec![Header::new("Authorization", "Bearer t")],
            body: Some(r#"{"a":1}"#.to_string()),
        };

        let code = generate_http_client_code(&params);
        assert!(code.contains(
            "new HttpRequestMessage(HttpMethod.Post, \"https://api.example.com/users\");"
        ));
        assert!(code.contains("request.Headers.TryAddWithoutValidation(\"Authorization\", \"Bearer t\");"));
        assert!(code.contains(
            r#"request.Content = new StringContent("{\"a\":1}", Encoding.UTF8, "application/json");"#
        ));
        assert!(code.contains("await client.SendAsync(request);"));
    }

    #[test]
    fn test_csharp_head_without_body() {
        let params = TemplateParams {
            method: HttpMethod::HEAD,
            url: "https://api.example.com".to_string(),
            headers: vec![],
            body: None,
        };

        let code = generate_http_client_code(&params);
        assert!(code.contains("HttpMethod.Head"));
        assert!(!code.contains("StringContent"));
    }

    #[test]
    fn test_csharp_line_separators_are_escaped() {
        let params = TemplateParams {
            method: HttpMethod::POST,
            url: "https://x.test/a\u{0085}b".to_string(),
            headers: vec![Header::new("X-Note", "a\u{2028}b")],
            body: Some("{\"note\":\"c\u{2029}d\"}".to_string()),
        };

        let code = generate_http_client_code(&params);
        for separator in ['\u{0085}', '\u{2028}', '\u{2029}'] {
            assert!(!code.contains(separator));
        }
        assert!(code.contains(r#"new HttpRequestMessage(HttpMethod.Post, "https://x.test/a\u0085b");"#));
        assert!(code.contains(r#"request.Headers.TryAddWithoutValidation("X-Note", "a\u2028b");"#));
        assert!(code.contains(r#"new StringContent("{\"note\":\"c\u2029d\"}""#));
    }
}
