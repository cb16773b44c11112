//! Type definitions for extracted swagger endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods recognized as operations under a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Match a path item key against the method set.
    ///
    /// The match is case-sensitive: only lowercase keys are operations.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// The path item key this method was read from
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter location in HTTP request
///
/// Swagger 2 `body` parameters are kept alongside the OpenAPI 3 locations.
/// Anything else (e.g. `cookie`, `formData`) is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    Other(String),
}

impl ParameterLocation {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
            ParameterLocation::Other(other) => other,
        }
    }
}

impl From<&str> for ParameterLocation {
    fn from(value: &str) -> Self {
        match value {
            "path" => ParameterLocation::Path,
            "query" => ParameterLocation::Query,
            "header" => ParameterLocation::Header,
            "body" => ParameterLocation::Body,
            other => ParameterLocation::Other(other.to_string()),
        }
    }
}

impl From<String> for ParameterLocation {
    fn from(value: String) -> Self {
        ParameterLocation::from(value.as_str())
    }
}

impl From<ParameterLocation> for String {
    fn from(value: ParameterLocation) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter of an endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Where the parameter is located
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Declared primitive type, `"string"` when the document declares none
    #[serde(rename = "type")]
    pub param_type: String,
    /// Parameter description
    pub description: String,
    /// Whether the parameter is required
    pub required: bool,
    /// Example value, synthesized from the type when absent
    pub example: String,
}

/// A single endpoint extracted from a swagger document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Identifier of the document this endpoint came from
    pub swagger_name: String,
    /// URL path template (e.g. "/pets/{petId}")
    pub path: String,
    /// Operation ID (from the document or generated from method + path)
    pub operation_id: String,
    pub method: HttpMethod,
    pub summary: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    pub request_body_example: Value,
    pub success_example_response: Value,
    pub error_example_response: Value,
}

impl Endpoint {
    /// Parameters declared at the given location, in declaration order
    pub fn parameters_in<'a>(
        &'a self,
        location: &'a ParameterLocation,
    ) -> impl Iterator<Item = &'a Parameter> + 'a {
        self.parameters.iter().filter(move |p| &p.location == location)
    }
}

/// A document as it is delivered to the registry by the config loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerSource {
    /// Identifier of the document (the config entry's `name`)
    pub name: String,
    /// URL the document was fetched from
    pub url: String,
    /// The parsed document
    pub schema: Value,
}

/// Listing entry for a registered document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwaggerSummary {
    pub id: String,
    pub url: String,
    /// `info.title` of the document, if it has one
    pub title: Option<String>,
}
