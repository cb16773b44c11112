//! # mcp-server
//!
//! MCP (Model Context Protocol) server exposing a swagger collection as
//! three query tools. Supports both stdio and HTTP/SSE transports.

pub mod protocol;
mod server;
pub mod tools;
pub mod transport;

pub use protocol::{McpError, McpMessage, ServerCapabilities};
pub use server::{McpServer, ServerMode};
pub use tools::{ToolCatalog, ToolExecutor};
pub use transport::{HttpTransport, StdioTransport};
