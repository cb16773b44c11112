//! MCP request handler

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::capabilities::ServerCapabilities;
use super::types::*;
use crate::tools::{ToolCatalog, ToolExecutor};
use swagger_parser::SwaggerCollection;

/// Name the server reports during initialization
pub const SERVER_NAME: &str = "swagger";

/// Handler for MCP requests
pub struct RequestHandler {
    /// Tool executor
    tool_executor: ToolExecutor,
    /// Server version
    server_version: String,
    /// Whether the session is initialized
    initialized: bool,
}

impl RequestHandler {
    /// Create a new request handler
    pub fn new(collection: Arc<SwaggerCollection>) -> Self {
        Self {
            tool_executor: ToolExecutor::new(collection),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            initialized: false,
        }
    }

    /// Whether an `initialize` request has been handled
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Handle an incoming message. Requests get a response; notifications
    /// and stray responses do not.
    pub fn handle(&mut self, message: McpMessage) -> Option<McpMessage> {
        if let Some((method, id)) = message.as_request() {
            let (method, id) = (method.to_string(), id.clone());
            debug!("Handling request: {}", method);

            if message.jsonrpc != JSONRPC_VERSION {
                return Some(McpMessage::error_response(Some(id), McpError::invalid_request()));
            }

            let result = match method.as_str() {
                "initialize" => self.handle_initialize(message.params),
                "ping" => Ok(serde_json::json!({})),
                "tools/list" => self.handle_tools_list(),
                "tools/call" => self.handle_tools_call(message.params),
                other => Err(McpError::method_not_found(other)),
            };

            return Some(match result {
                Ok(result) => McpMessage::response(id, result),
                Err(error) => McpMessage::error_response(Some(id), error),
            });
        }

        if let Some(method) = message.as_notification() {
            match method {
                "notifications/initialized" | "initialized" => info!("Client initialized"),
                "notifications/cancelled" => debug!("Request cancelled"),
                other => debug!("Unknown notification: {}", other),
            }
            return None;
        }

        debug!("Received unexpected response");
        None
    }

    /// Handle initialize request
    fn handle_initialize(&mut self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = parse_params(params.or_else(|| Some(serde_json::json!({}))))?;

        match &params.client_info {
            Some(client) => info!(
                "Initializing session with client: {} v{}",
                client.name, client.version
            ),
            None => info!("Initializing session with unnamed client"),
        }

        self.initialized = true;

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::with_tools(),
            server_info: PeerInfo {
                name: SERVER_NAME.to_string(),
                version: self.server_version.clone(),
            },
        };

        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let result = ToolsListResult {
            tools: ToolCatalog::tools(),
        };
        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    /// Handle tools/call request
    fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = parse_params(params)?;

        debug!("Calling tool: {}", params.name);

        let result = match self.tool_executor.execute(&params.name, params.arguments) {
            Ok(tool_result) => tool_result,
            Err(e) => {
                error!("Tool execution failed: {}", e);
                ToolCallResult::error(e.to_string())
            }
        };

        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::invalid_params(e.to_string()))?
        .ok_or_else(|| McpError::invalid_params("Missing params"))
}
