//! Endpoint extraction from a swagger document

use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::sample::SampleSynthesizer;
use crate::schema::{is_truthy, JsonExt};
use crate::types::*;

/// Media type whose examples are reported
const JSON_MEDIA_TYPE: &str = "application/json";

/// Reader over one parsed swagger document.
///
/// The document is never modified. Every call re-derives its result, and
/// malformed sections degrade to empty values instead of failing.
#[derive(Debug, Clone)]
pub struct SwaggerParser {
    name: String,
    document: Value,
    clock: Arc<dyn Clock>,
}

impl SwaggerParser {
    /// Create a parser for `document`, identified as `name`
    pub fn new(name: impl Into<String>, document: Value) -> Self {
        Self {
            name: name.into(),
            document,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` for date and date-time samples
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Identifier of the document
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `info.title` of the document
    pub fn title(&self) -> Option<&str> {
        self.document
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
    }

    /// List all endpoints in path declaration order
    pub fn list_endpoints(&self) -> Vec<Endpoint> {
        let synthesizer = SampleSynthesizer::new(&self.document, self.clock.as_ref());
        let mut endpoints = Vec::new();

        let Some(paths) = self.document.field_object("paths") else {
            debug!("Document {} has no paths", self.name);
            return endpoints;
        };

        for (path, path_item) in paths {
            let Some(path_item) = path_item.as_object() else {
                continue;
            };

            for (key, operation) in path_item {
                let Some(method) = HttpMethod::from_key(key) else {
                    continue;
                };
                endpoints.push(self.extract_endpoint(path, method, operation, &synthesizer));
            }
        }

        debug!("Extracted {} endpoints from {}", endpoints.len(), self.name);
        endpoints
    }

    /// Find the first endpoint with the given operation ID
    pub fn find_endpoint(&self, operation_id: &str) -> Option<Endpoint> {
        self.list_endpoints()
            .into_iter()
            .find(|e| e.operation_id == operation_id)
    }

    fn extract_endpoint(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &Value,
        synthesizer: &SampleSynthesizer<'_>,
    ) -> Endpoint {
        let operation_id = operation
            .field_str("operationId")
            .map(str::to_string)
            .unwrap_or_else(|| Self::generate_operation_id(path, method));

        Endpoint {
            swagger_name: self.name.clone(),
            path: path.to_string(),
            operation_id,
            method,
            summary: operation.field_str("summary").unwrap_or_default().to_string(),
            description: operation
                .field_str("description")
                .unwrap_or_default()
                .to_string(),
            parameters: Self::extract_parameters(operation),
            request_body_example: Self::request_body_example(operation, synthesizer),
            success_example_response: Self::success_example(operation, synthesizer),
            error_example_response: Self::error_example(operation, synthesizer),
        }
    }

    /// Generate an operation ID from method and path: `get` + `/pets/{id}` -> `get_pets_{id}`
    fn generate_operation_id(path: &str, method: HttpMethod) -> String {
        format!("{}{}", method.key(), path.replace('/', "_"))
    }

    fn extract_parameters(operation: &Value) -> Vec<Parameter> {
        let Some(parameters) = operation.get("parameters").and_then(Value::as_array) else {
            return Vec::new();
        };

        parameters.iter().map(Self::convert_parameter).collect()
    }

    fn convert_parameter(param: &Value) -> Parameter {
        let param_type = param
            .get("schema")
            .and_then(|s| s.field_str("type"))
            .or_else(|| param.field_str("type"))
            .unwrap_or("string")
            .to_string();

        let example = param
            .field("example")
            .map(Self::example_text)
            .unwrap_or_else(|| Self::example_for_type(&param_type).to_string());

        Parameter {
            name: param.field_str("name").unwrap_or_default().to_string(),
            location: ParameterLocation::from(param.field_str("in").unwrap_or("query")),
            description: param.field_str("description").unwrap_or_default().to_string(),
            required: param.get("required").and_then(Value::as_bool).unwrap_or(false),
            param_type,
            example,
        }
    }

    /// Render a document-provided example as parameter text
    fn example_text(example: &Value) -> String {
        match example {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Canned example for a primitive type
    fn example_for_type(param_type: &str) -> &'static str {
        match param_type {
            "string" => "example_string",
            "integer" => "123",
            "number" => "123.45",
            "boolean" => "true",
            _ => "",
        }
    }

    fn request_body_example(operation: &Value, synthesizer: &SampleSynthesizer<'_>) -> Value {
        operation
            .field("requestBody")
            .and_then(Self::json_content)
            .and_then(|content| Self::content_example(content, synthesizer))
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    fn success_example(operation: &Value, synthesizer: &SampleSynthesizer<'_>) -> Value {
        operation
            .field("responses")
            .and_then(|responses| responses.field("200"))
            .and_then(Self::json_content)
            .and_then(|content| Self::content_example(content, synthesizer))
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    fn error_example(operation: &Value, synthesizer: &SampleSynthesizer<'_>) -> Value {
        let mut responses: Vec<(&String, &Value)> = operation
            .field("responses")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .collect();

        // Index-like keys iterate first in ascending order, the rest keep declaration order
        responses.sort_by_key(|(code, _)| match Self::array_index(code) {
            Some(index) => (false, index),
            None => (true, 0),
        });

        for (code, response) in responses {
            if !Self::is_error_status(code) {
                continue;
            }

            let example = Self::json_content(response)
                .and_then(|content| Self::content_example(content, synthesizer));
            if let Some(example) = example {
                debug!("Using {} response as error example", code);
                return example;
            }
        }

        json!({
            "error": {
                "code": 400,
                "message": "Bad Request"
            }
        })
    }

    /// `content["application/json"]` of a request body or response
    fn json_content(holder: &Value) -> Option<&Value> {
        holder
            .field("content")
            .and_then(|content| content.field(JSON_MEDIA_TYPE))
    }

    /// Example for a media type: explicit example, then schema example, then synthesized
    fn content_example(content: &Value, synthesizer: &SampleSynthesizer<'_>) -> Option<Value> {
        if let Some(example) = content.field("example") {
            return Some(example.clone());
        }

        let schema = content.field("schema")?;
        if let Some(example) = schema.field("example") {
            return Some(example.clone());
        }

        Some(synthesizer.synthesize(Some(schema)))
    }

    /// Whether a response key looks like a 4xx/5xx status.
    ///
    /// Only the leading integer counts: `"404"` and `"500 "` qualify, while
    /// `"4XX"` reads as 4 and `"default"` has no number at all.
    fn is_error_status(code: &str) -> bool {
        Self::leading_integer(code).is_some_and(|n| n.div_euclid(100) >= 4)
    }

    /// A key that is a canonical array index: digits only, no leading zero, below 2^32 - 1
    fn array_index(key: &str) -> Option<u32> {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if key.len() > 1 && key.starts_with('0') {
            return None;
        }
        key.parse::<u32>().ok().filter(|&index| index != u32::MAX)
    }

    /// Leading decimal integer, saturating when the digit run overflows
    fn leading_integer(text: &str) -> Option<i64> {
        let text = text.trim_start();
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let digits = &digits[..end];
        if digits.is_empty() {
            return None;
        }

        let value = match digits.parse::<i64>() {
            Ok(value) => value,
            Err(_) => i64::MAX,
        };

        Some(if negative { -value } else { value })
    }
}
