//! MCP protocol types and handling

mod types;
mod handler;
mod capabilities;

pub use types::*;
pub use handler::{RequestHandler, SERVER_NAME};
pub use capabilities::ServerCapabilities;
