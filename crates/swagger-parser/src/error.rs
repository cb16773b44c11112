//! Error types for the swagger parser

use thiserror::Error;

/// Result type alias for loader operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Loader error types
///
/// Only configuration acquisition produces these. Extraction and sample
/// synthesis never fail; they fall back to empty defaults instead.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to fetch swagger document: {0}")]
    FetchError(String),

    #[error("Invalid config format: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL for '{name}': {url}")]
    InvalidUrl { name: String, url: String },

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Endpoint id decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointIdError {
    #[error("Invalid endpoint ID format: {0}")]
    InvalidFormat(String),
}
