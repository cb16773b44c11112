//! HTTP/SSE transport for MCP

use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::protocol::{McpMessage, RequestHandler};
use swagger_parser::SwaggerCollection;

/// Shared state for HTTP handlers
struct AppState {
    handler: RwLock<RequestHandler>,
}

/// HTTP transport for MCP protocol
pub struct HttpTransport {
    collection: Arc<SwaggerCollection>,
    port: u16,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(collection: Arc<SwaggerCollection>, port: u16) -> Self {
        Self { collection, port }
    }

    /// Build the router serving the MCP endpoints
    pub fn router(collection: Arc<SwaggerCollection>) -> Router {
        let state = Arc::new(AppState {
            handler: RwLock::new(RequestHandler::new(collection)),
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(health))
            .route("/health", get(health))
            .route("/mcp", post(handle_mcp_request))
            .route("/mcp/sse", get(handle_mcp_sse))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the HTTP server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = Self::router(Arc::clone(&self.collection));

        let addr = format!("0.0.0.0:{}", self.port);
        info!("Starting MCP HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Handle MCP JSON-RPC request via HTTP POST
async fn handle_mcp_request(
    State(state): State<Arc<AppState>>,
    Json(message): Json<McpMessage>,
) -> Json<McpMessage> {
    debug!("HTTP request: {:?}", message);

    let mut handler = state.handler.write().await;

    match handler.handle(message) {
        Some(response) => Json(response),
        // Notification - acknowledge with an empty result
        None => Json(McpMessage::response(
            serde_json::Value::Null,
            serde_json::json!({}),
        )),
    }
}

/// Readiness event for SSE clients
async fn handle_mcp_sse(
    State(_state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE connection established");

    let stream = async_stream::stream! {
        yield Ok(Event::default().data(r#"{"status":"ready"}"#));
    };

    Sse::new(stream)
}
