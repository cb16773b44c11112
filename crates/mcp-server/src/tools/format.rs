//! Text rendering for tool results

use serde_json::Value;
use swagger_parser::{Endpoint, EndpointId, Parameter, ParameterLocation, SwaggerSummary};

/// Separator between endpoint detail blocks
pub const DETAILS_SEPARATOR: &str = "\n\n---\n\n";

/// Result text when no endpoint ids were requested
pub const NO_DETAILS: &str = "No endpoint details found.";

/// One line per document under a fixed header
pub fn format_swagger_list(swaggers: &[SwaggerSummary]) -> String {
    let mut result = String::from("List of available swaggers (id | name | url):\n");
    for swagger in swaggers {
        result.push_str(&format!(
            "{} | {} | {}\n",
            swagger.id,
            swagger.title.as_deref().unwrap_or_default(),
            swagger.url
        ));
    }
    result
}

/// One line per endpoint under a fixed header
pub fn format_endpoint_list(endpoints: &[Endpoint]) -> String {
    let mut result =
        String::from("List of available endpoints (endpointId | method | path | description):\n");
    for endpoint in endpoints {
        result.push_str(&format!(
            "{} | {} {} | {}\n",
            EndpointId::encode(&endpoint.swagger_name, &endpoint.operation_id),
            endpoint.method,
            endpoint.path,
            merged_description(endpoint)
        ));
    }
    result
}

/// Summary (period-terminated) followed by description, or description alone
pub fn merged_description(endpoint: &Endpoint) -> String {
    if endpoint.summary.is_empty() {
        return endpoint.description.clone();
    }

    let period = if endpoint.summary.ends_with('.') { "" } else { "." };
    format!("{}{} {}", endpoint.summary, period, endpoint.description)
        .trim()
        .to_string()
}

/// Markdown block describing one endpoint, with example request and responses
pub fn format_endpoint_details(endpoint: &Endpoint) -> String {
    let mut result = String::new();

    result.push_str(&format!("## {} {}\n", endpoint.operation_id, endpoint.summary));
    result.push_str(&format!("### URL: {} {}\n", endpoint.method, endpoint.path));

    if !endpoint.description.is_empty() {
        result.push_str(&format!("### Description\n{}\n", endpoint.description));
    }

    let path_params: Vec<&Parameter> = endpoint.parameters_in(&ParameterLocation::Path).collect();
    let query_params: Vec<&Parameter> = endpoint.parameters_in(&ParameterLocation::Query).collect();
    let body_params: Vec<&Parameter> = endpoint.parameters_in(&ParameterLocation::Body).collect();
    let other_params: Vec<&Parameter> = endpoint
        .parameters
        .iter()
        .filter(|p| {
            !matches!(
                p.location,
                ParameterLocation::Path | ParameterLocation::Query | ParameterLocation::Body
            )
        })
        .collect();

    push_parameter_group(&mut result, "Path Parameters", &path_params, false);
    push_parameter_group(&mut result, "Query Parameters", &query_params, false);
    push_parameter_group(&mut result, "Body Parameters", &body_params, false);
    push_parameter_group(&mut result, "Other Parameters", &other_params, true);

    result.push_str("### Example Request\n");
    result.push_str("```http\n");
    result.push_str(&format!(
        "{} {}\n",
        endpoint.method,
        example_url(&endpoint.path, &path_params, &query_params)
    ));

    let has_request_body = !body_params.is_empty();
    if has_request_body {
        result.push_str("Content-Type: application/json\n");
    }

    for param in &other_params {
        if param.location == ParameterLocation::Header {
            let value = if param.example.is_empty() {
                "example-value"
            } else {
                param.example.as_str()
            };
            result.push_str(&format!("{}: {}\n", param.name, value));
        }
    }

    if has_request_body {
        result.push('\n');
        result.push_str(&pretty_json(&endpoint.request_body_example));
    }
    result.push_str("\n```\n\n");

    result.push_str("### Example Response\n");
    result.push_str("```http\n");
    result.push_str("HTTP/2 200 OK\n");
    result.push_str("Content-Type: application/json\n\n");
    result.push_str(&pretty_json(&endpoint.success_example_response));
    result.push_str("\n```\n\n");

    result.push_str("### Error Response Example\n");
    result.push_str("```http\n");
    result.push_str("HTTP/2 400 Bad Request\n");
    result.push_str("Content-Type: application/json\n\n");
    result.push_str(&pretty_json(&endpoint.error_example_response));
    result.push_str("\n```");

    result
}

fn push_parameter_group(out: &mut String, title: &str, params: &[&Parameter], show_location: bool) {
    if params.is_empty() {
        return;
    }

    out.push_str(&format!("### {}\n", title));
    for param in params {
        let location = if show_location {
            format!("{}, ", param.location)
        } else {
            String::new()
        };
        let required = if param.required { ", required" } else { "" };
        out.push_str(&format!(
            "- `{}` ({}{}{}): {}\n",
            param.name, location, param.param_type, required, param.description
        ));
    }
    out.push('\n');
}

/// Path with `{name}` placeholders filled in, plus the example query string
fn example_url(path: &str, path_params: &[&Parameter], query_params: &[&Parameter]) -> String {
    let mut url = path.to_string();

    for param in path_params {
        let placeholder = format!("{{{}}}", param.name);
        let value = if param.example.is_empty() {
            placeholder.clone()
        } else {
            param.example.clone()
        };
        url = url.replacen(&placeholder, &value, 1);
    }

    if !query_params.is_empty() {
        let query: Vec<String> = query_params
            .iter()
            .map(|p| {
                let value = if p.example.is_empty() {
                    format!("{{{}}}", p.name)
                } else {
                    p.example.clone()
                };
                format!("{}={}", p.name, encode_query_value(&value))
            })
            .collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }

    url
}

/// Percent-encode a query value, leaving `!'()*` as they are
fn encode_query_value(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// JSON with two-space indentation
fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use swagger_parser::HttpMethod;

    fn param(name: &str, location: ParameterLocation, example: &str, required: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            location,
            param_type: "string".to_string(),
            description: format!("The {}", name),
            required,
            example: example.to_string(),
        }
    }

    fn endpoint() -> Endpoint {
        Endpoint {
            swagger_name: "pet-store".to_string(),
            path: "/pets/{petId}/toys".to_string(),
            operation_id: "listToys".to_string(),
            method: HttpMethod::Get,
            summary: "List toys".to_string(),
            description: "Toys owned by a pet".to_string(),
            parameters: vec![
                param("petId", ParameterLocation::Path, "rex", true),
                param("q", ParameterLocation::Query, "red ball", false),
                param("X-Trace", ParameterLocation::Header, "", false),
            ],
            request_body_example: json!({}),
            success_example_response: json!([{"id": 0}]),
            error_example_response: json!({"error": {"code": 400, "message": "Bad Request"}}),
        }
    }

    #[test]
    fn test_swagger_list() {
        let text = format_swagger_list(&[
            SwaggerSummary {
                id: "pets".to_string(),
                url: "https://example.com/pets.json".to_string(),
                title: Some("Petstore".to_string()),
            },
            SwaggerSummary {
                id: "bare".to_string(),
                url: "https://example.com/bare.json".to_string(),
                title: None,
            },
        ]);
        assert_eq!(
            text,
            "List of available swaggers (id | name | url):\n\
             pets | Petstore | https://example.com/pets.json\n\
             bare |  | https://example.com/bare.json\n"
        );
    }

    #[test]
    fn test_endpoint_list() {
        let text = format_endpoint_list(&[endpoint()]);
        assert_eq!(
            text,
            "List of available endpoints (endpointId | method | path | description):\n\
             pet-store-listToys | GET /pets/{petId}/toys | List toys. Toys owned by a pet\n"
        );
    }

    #[test]
    fn test_merged_description() {
        let mut e = endpoint();
        e.summary = "Already terminated.".to_string();
        assert_eq!(merged_description(&e), "Already terminated. Toys owned by a pet");

        e.description = String::new();
        assert_eq!(merged_description(&e), "Already terminated.");

        e.summary = String::new();
        e.description = "Only description".to_string();
        assert_eq!(merged_description(&e), "Only description");
    }

    #[test]
    fn test_details_layout() {
        let text = format_endpoint_details(&endpoint());

        assert!(text.starts_with("## listToys List toys\n### URL: GET /pets/{petId}/toys\n"));
        assert!(text.contains("### Description\nToys owned by a pet\n"));
        assert!(text.contains("### Path Parameters\n- `petId` (string, required): The petId\n\n"));
        assert!(text.contains("### Query Parameters\n- `q` (string): The q\n\n"));
        assert!(text.contains("### Other Parameters\n- `X-Trace` (header, string): The X-Trace\n\n"));
        assert!(!text.contains("### Body Parameters"));
        assert!(text.contains("```http\nGET /pets/rex/toys?q=red%20ball\nX-Trace: example-value\n\n```\n\n"));
        assert!(text.contains("HTTP/2 200 OK\nContent-Type: application/json\n\n[\n  {\n    \"id\": 0\n  }\n]\n```"));
        assert!(text.ends_with(
            "HTTP/2 400 Bad Request\nContent-Type: application/json\n\n{\n  \"error\": {\n    \"code\": 400,\n    \"message\": \"Bad Request\"\n  }\n}\n```"
        ));
    }

    #[test]
    fn test_details_with_body_parameters() {
        let mut e = endpoint();
        e.method = HttpMethod::Post;
        e.parameters = vec![param("payload", ParameterLocation::Body, "", true)];
        e.request_body_example = json!({"name": "string"});

        let text = format_endpoint_details(&e);
        assert!(text.contains("### Body Parameters\n- `payload` (string, required): The payload\n\n"));
        assert!(text.contains(
            "```http\nPOST /pets/{petId}/toys\nContent-Type: application/json\n\n{\n  \"name\": \"string\"\n}\n```"
        ));
    }

    #[test]
    fn test_query_value_keeps_unreserved_marks() {
        assert_eq!(encode_query_value("it's (a) test!*"), "it's%20(a)%20test!*");
        assert_eq!(encode_query_value("a&b=c/d"), "a%26b%3Dc%2Fd");
    }

    #[test]
    fn test_example_url_keeps_placeholder_without_example() {
        let path_param = param("id", ParameterLocation::Path, "", true);
        let query_param = param("page", ParameterLocation::Query, "", false);
        assert_eq!(
            example_url("/things/{id}", &[&path_param], &[&query_param]),
            "/things/{id}?page=%7Bpage%7D"
        );
    }
}
