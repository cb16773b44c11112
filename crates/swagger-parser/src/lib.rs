//! # swagger-parser
//!
//! Swagger/OpenAPI document reader for swagger-mcp.
//! Extracts endpoints from parsed documents and synthesizes example request
//! and response payloads from their schemas.

mod clock;
mod collection;
mod config;
mod endpoint_id;
mod error;
mod parser;
mod sample;
mod schema;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collection::SwaggerCollection;
pub use config::{parse_document, ConfigLoader, EndpointConfig, SwaggerConfig, DEFAULT_FETCH_TIMEOUT};
pub use endpoint_id::EndpointId;
pub use error::{EndpointIdError, ParseError, ParseResult};
pub use parser::SwaggerParser;
pub use sample::SampleSynthesizer;
pub use schema::{is_truthy, JsonExt, SchemaNode, StringFormat};
pub use types::*;
