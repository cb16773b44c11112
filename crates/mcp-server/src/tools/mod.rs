//! Tool definitions, execution and result formatting

mod definitions;
mod executor;
pub mod format;

pub use definitions::{ToolCatalog, GET_ENDPOINTS, LIST_ENDPOINTS, LIST_SWAGGERS};
pub use executor::{ToolError, ToolExecutor};
