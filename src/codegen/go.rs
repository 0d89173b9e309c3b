//! Go code generation using `net/http`.

use super::{escape_string, TemplateParams};

/// Generates a Go program that sends the request with `http.Client`.
///
/// The request body is `nil` when absent, otherwise a `strings.NewReader`
/// over the JSON text. `strings` is only imported when it is used, since Go
/// rejects unused imports.
pub fn generate_net_http_code(params: &TemplateParams) -> String {
    let body_reader = match &params.body {
        Some(body) => format!("strings.NewReader(\"{}\")", escape_string(body)),
        None => "nil".to_string(),
    };

    let mut code = String::new();

    code.push_str("package main\n\n");
    code.push_str("import (\n");
    code.push_str("\t\"fmt\"\n");
    code.push_str("\t\"io\"\n");
    code.push_str("\t\"net/http\"\n");
    if params.body.is_some() {
        code.push_str("\t\"strings\"\n");
    }
    code.push_str(")\n\n");

    code.push_str("func main() {\n");
    code.push_str("\tclient := &http.Client{}\n\n");
    code.push_str(&format!(
        "\treq, err := http.NewRequest(\"{}\", \"{}\", {})\n",
        params.method, params.url, body_reader
    ));
    code.push_str("\tif err != nil {\n");
    code.push_str("\t\tfmt.Println(err)\n");
    code.push_str("\t\treturn\n");
    code.push_str("\t}\n");

    for header in &params.headers {
        code.push_str(&format!(
            "\treq.Header.Add(\"{}\", \"{}\")\n",
            header.key, header.value
        ));
    }

    code.push('\n');
    code.push_str("\tresp, err := client.Do(req)\n");
    code.push_str("\tif err != nil {\n");
    code.push_str("\t\tfmt.Println(err)\n");
    code.push_str("\t\treturn\n");
    code.push_str("\t}\n");
    code.push_str("\tdefer resp.Body.Close()\n\n");
    code.push_str("\tbody, _ := io.ReadAll(resp.Body)\n");
    code.push_str("\tfmt.Println(string(body))\n");
    code.push('}');

    code
}
