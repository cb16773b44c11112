//! Definitions of the tools advertised by the server

use serde_json::{json, Map, Value};

use crate::protocol::{McpInputSchema, McpTool};

pub const LIST_SWAGGERS: &str = "list-swaggers";
pub const LIST_ENDPOINTS: &str = "list-endpoints";
pub const GET_ENDPOINTS: &str = "get-endpoints";

/// Builds the MCP tool list
pub struct ToolCatalog;

impl ToolCatalog {
    /// All tools, in the order they are advertised
    pub fn tools() -> Vec<McpTool> {
        vec![
            Self::list_swaggers(),
            Self::list_endpoints(),
            Self::get_endpoints(),
        ]
    }

    fn list_swaggers() -> McpTool {
        McpTool {
            name: LIST_SWAGGERS.to_string(),
            description: Some("List all connected swagger endpoints".to_string()),
            input_schema: McpInputSchema::default(),
        }
    }

    fn list_endpoints() -> McpTool {
        McpTool {
            name: LIST_ENDPOINTS.to_string(),
            description: Some(
                "List all available endpoints with a short description. \
                 If swagger is provided, only endpoints from that swagger will be listed."
                    .to_string(),
            ),
            input_schema: McpInputSchema {
                schema_type: "object".to_string(),
                properties: Some(properties([(
                    "swagger",
                    json!({
                        "type": "string",
                        "description": "Swagger id returned by list-swaggers"
                    }),
                )])),
                required: None,
            },
        }
    }

    fn get_endpoints() -> McpTool {
        McpTool {
            name: GET_ENDPOINTS.to_string(),
            description: Some("Get detailed information about specific endpoints".to_string()),
            input_schema: McpInputSchema {
                schema_type: "object".to_string(),
                properties: Some(properties([(
                    "endpointIds",
                    json!({
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "List of endpoint IDs to retrieve details for. \
                                        Endpoint ids can be found in the list-endpoints tool."
                    }),
                )])),
                required: Some(vec!["endpointIds".to_string()]),
            },
        }
    }
}

fn properties<const N: usize>(entries: [(&str, Value); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect()
}
