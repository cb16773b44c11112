//! Main MCP server orchestration

use std::sync::Arc;
use tracing::info;

use crate::transport::{HttpTransport, StdioTransport};
use swagger_parser::SwaggerCollection;

/// Server mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerMode {
    /// stdio transport
    #[default]
    Stdio,
    /// HTTP/SSE transport
    Http { port: u16 },
}

/// MCP server over a loaded swagger collection
pub struct McpServer {
    collection: Arc<SwaggerCollection>,
    mode: ServerMode,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(collection: Arc<SwaggerCollection>) -> Self {
        Self {
            collection,
            mode: ServerMode::default(),
        }
    }

    /// Set the server mode
    pub fn with_mode(mut self, mode: ServerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current server mode
    pub fn mode(&self) -> ServerMode {
        self.mode
    }

    /// Run the server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Serving {} swagger document(s)", self.collection.len());

        match self.mode {
            ServerMode::Stdio => {
                info!("Starting MCP server in stdio mode");
                let mut transport = StdioTransport::new(Arc::clone(&self.collection));
                transport.run().await
            }
            ServerMode::Http { port } => {
                info!("Starting MCP server in HTTP mode on port {}", port);
                let transport = HttpTransport::new(Arc::clone(&self.collection), port);
                transport.run().await
            }
        }
    }
}
