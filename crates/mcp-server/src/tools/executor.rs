//! Execute MCP tools against the swagger collection

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use swagger_parser::{EndpointId, SwaggerCollection};

use super::definitions::{GET_ENDPOINTS, LIST_ENDPOINTS, LIST_SWAGGERS};
use super::format;
use crate::protocol::ToolCallResult;

/// Errors raised while dispatching a tool call
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

#[derive(Debug, Default, Deserialize)]
struct ListEndpointsArgs {
    #[serde(default)]
    swagger: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetEndpointsArgs {
    endpoint_ids: Vec<String>,
}

/// Executor for MCP tools
pub struct ToolExecutor {
    collection: Arc<SwaggerCollection>,
}

impl ToolExecutor {
    /// Create a new tool executor
    pub fn new(collection: Arc<SwaggerCollection>) -> Self {
        Self { collection }
    }

    /// Execute a tool by name
    pub fn execute(
        &self,
        tool_name: &str,
        arguments: Option<Value>,
    ) -> Result<ToolCallResult, ToolError> {
        debug!("Executing tool: {}", tool_name);

        let text = match tool_name {
            LIST_SWAGGERS => self.list_swaggers(),
            LIST_ENDPOINTS => {
                let args: ListEndpointsArgs = parse_arguments(tool_name, arguments)?;
                self.list_endpoints(args.swagger.as_deref())
            }
            GET_ENDPOINTS => {
                let args: GetEndpointsArgs = parse_arguments(tool_name, arguments)?;
                self.get_endpoints(&args.endpoint_ids)
            }
            _ => return Err(ToolError::UnknownTool(tool_name.to_string())),
        };

        Ok(ToolCallResult::text(text))
    }

    /// `list-swaggers`
    pub fn list_swaggers(&self) -> String {
        format::format_swagger_list(&self.collection.list())
    }

    /// `list-endpoints`, optionally restricted to one document
    pub fn list_endpoints(&self, swagger: Option<&str>) -> String {
        let ids: Vec<&str> = match swagger {
            Some(id) => vec![id],
            None => self.collection.ids().collect(),
        };

        let endpoints: Vec<_> = ids
            .into_iter()
            .filter_map(|id| self.collection.get(id))
            .flat_map(|parser| parser.list_endpoints())
            .collect();

        format::format_endpoint_list(&endpoints)
    }

    /// `get-endpoints`: one block or diagnostic line per requested id
    pub fn get_endpoints(&self, endpoint_ids: &[String]) -> String {
        let blocks: Vec<String> = endpoint_ids
            .iter()
            .map(|token| self.endpoint_details(token))
            .collect();

        if blocks.is_empty() {
            return format::NO_DETAILS.to_string();
        }
        blocks.join(format::DETAILS_SEPARATOR)
    }

    fn endpoint_details(&self, token: &str) -> String {
        let Ok(id) = token.parse::<EndpointId>() else {
            return format!("Invalid endpoint ID format: {}", token);
        };

        let Some(parser) = self.collection.get(&id.document_id) else {
            return format!("Swagger not found: {} for endpoint {}", id.document_id, token);
        };

        match parser.find_endpoint(&id.operation_id) {
            Some(endpoint) => format::format_endpoint_details(&endpoint),
            None => format!(
                "Endpoint not found: {} in swagger {}",
                id.operation_id, id.document_id
            ),
        }
    }
}

fn parse_arguments<T>(tool: &str, arguments: Option<Value>) -> Result<T, ToolError>
where
    T: for<'de> Deserialize<'de>,
{
    let arguments = arguments.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}
