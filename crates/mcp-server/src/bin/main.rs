//! swagger-mcp - MCP server answering questions about Swagger/OpenAPI documents
//!
//! Reads a JSON config listing named documents, fetches every document once
//! at startup and serves the list-swaggers, list-endpoints and get-endpoints
//! tools. Logs go to stderr so stdout stays reserved for the protocol.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use mcp_server::{McpServer, ServerMode};
use swagger_parser::{ConfigLoader, SwaggerCollection};

/// swagger-mcp - query Swagger/OpenAPI documents over MCP
#[derive(Parser, Debug)]
#[command(name = "swagger-mcp")]
#[command(version)]
#[command(about = "MCP server for exploring Swagger/OpenAPI documents")]
struct Args {
    /// Path to the JSON config listing swagger documents
    #[arg(env = "SWAGGER_MCP_CONFIG")]
    config: PathBuf,

    /// Run in HTTP mode instead of stdio
    #[arg(long)]
    http: bool,

    /// Port for HTTP server (default: 3000)
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Timeout in seconds for fetching each document
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let loader = ConfigLoader::with_timeout(Duration::from_secs(args.timeout_secs))?;

    let sources = match loader.load(&args.config).await {
        Ok(sources) => sources,
        Err(e) => {
            error!("Failed to load swaggers from {}: {}", args.config.display(), e);
            return Err(e.into());
        }
    };

    info!("Loaded {} swagger document(s)", sources.len());

    let collection = Arc::new(SwaggerCollection::new(sources));

    let mode = if args.http {
        ServerMode::Http { port: args.port }
    } else {
        ServerMode::Stdio
    };

    McpServer::new(collection).with_mode(mode).run().await?;

    Ok(())
}
