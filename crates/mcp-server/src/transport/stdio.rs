//! stdio transport for MCP

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::protocol::{McpError, McpMessage, RequestHandler};
use swagger_parser::SwaggerCollection;

/// Line-delimited JSON-RPC over stdin/stdout
pub struct StdioTransport {
    handler: RequestHandler,
}

impl StdioTransport {
    /// Create a new stdio transport
    pub fn new(collection: Arc<SwaggerCollection>) -> Self {
        Self {
            handler: RequestHandler::new(collection),
        }
    }

    /// Serve stdin/stdout until EOF
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Swagger MCP Server running on stdio");

        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serve any line-oriented reader/writer pair until EOF
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();

            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            debug!("Received: {}", trimmed);

            let response = match serde_json::from_str::<McpMessage>(trimmed) {
                Ok(message) => self.handler.handle(message),
                Err(e) => {
                    error!("Failed to parse message: {}", e);
                    Some(McpMessage::error_response(None, McpError::parse_error()))
                }
            };

            if let Some(response) = response {
                let response_line = serde_json::to_string(&response)?;
                debug!("Sending: {}", response_line);
                writer.write_all(response_line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }
}
