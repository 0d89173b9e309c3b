//! Java code generation using `java.net.http.HttpClient` (Java 11+).

use super::{escape_string, TemplateParams};

/// Generates a Java program that sends the request with `HttpClient`.
pub fn generate_http_client_code(params: &TemplateParams) -> String {
    let publisher = match &params.body {
        Some(body) => format!("BodyPublishers.ofString(\"{}\")", escape_string(body)),
        None => "BodyPublishers.noBody()".to_string(),
    };

    let mut code = String::new();

    code.push_str("import java.net.URI;\n");
    code.push_str("import java.net.http.HttpClient;\n");
    code.push_str("import java.net.http.HttpRequest;\n");
    code.push_str("import java.net.http.HttpRequest.BodyPublishers;\n");
    code.push_str("import java.net.http.HttpResponse;\n");
    code.push_str("import java.net.http.HttpResponse.BodyHandlers;\n\n");
    code.push_str("public class Main {\n");
    code.push_str("    public static void main(String[] args) throws Exception {\n");
    code.push_str("        HttpClient client = HttpClient.newHttpClient();\n\n");
    code.push_str("        HttpRequest.Builder requestBuilder = HttpRequest.newBuilder()\n");
    code.push_str(&format!("            .uri(URI.create(\"{}\"))\n", params.url));
    code.push_str(&format!(
        "            .method(\"{}\", {});\n",
        params.method, publisher
    ));

    if !params.headers.is_empty() {
        code.push('\n');
        for header in &params.headers {
            code.push_str(&format!(
                "        requestBuilder.header(\"{}\", \"{}\");\n",
                header.key, header.value
            ));
        }
    }

    code.push('\n');
    code.push_str(
        "        HttpResponse<String> response = client.send(requestBuilder.build(), BodyHandlers.ofString());\n",
    );
    code.push_str("        System.out.println(response.body());\n");
    code.push_str("    }\n");
    code.push('}');

    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Header, HttpMethod};

    #[test]
    fn test_java_with_body() {
        let params = TemplateParams {
            method: HttpMethod::PUT,
            url: "https://api.example.com/users/1".to_string(),
            headers: vec![Header::new("Content-Type", "application/json")],
            body: Some(r#"{"name":"John"}"#.to_string()),
        };

        let code = generate_http_client_code(&params);
        assert!(code.contains(".uri(URI.create(\"https://api.example.com/users/1\"))"));
        assert!(code.contains(r#".method("PUT", BodyPublishers.ofString("{\"name\":\"John\"}"));"#));
        assert!(code.contains("requestBuilder.header(\"Content-Type\", \"application/json\");"));
        assert!(code.ends_with("}"));
    }

    #[test]
    fn test_java_without_body() {
        let params = TemplateParams {
            method: HttpMethod::GET,
            url: "https://api.example.com".to_string(),
            headers: vec![],
            body: None,
        };

        let code = generate_http_client_code(&params);
        assert!(code.contains(".method(\"GET\", BodyPublishers.noBody());"));
        assert!(!code.contains("requestBuilder.header"));
    }
}
