//! Configuration loading: read the endpoint list and fetch every document

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::{ParseError, ParseResult};
use crate::types::SwaggerSource;

/// Default timeout for a single document fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Contents of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerConfig {
    pub endpoints: Vec<EndpointConfig>,
}

/// One configured document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Identifier the document is registered under
    pub name: String,
    /// Where to fetch the document from
    pub url: String,
}

impl SwaggerConfig {
    /// Read and validate a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> ParseResult<Self> {
        let path = path.as_ref();
        debug!("Reading config from {:?}", path);

        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration JSON
    pub fn parse(contents: &str) -> ParseResult<Self> {
        let config: SwaggerConfig = serde_json::from_str(contents)
            .map_err(|e| ParseError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Every url must be an absolute URL
    fn validate(&self) -> ParseResult<()> {
        for endpoint in &self.endpoints {
            Url::parse(&endpoint.url).map_err(|_| ParseError::InvalidUrl {
                name: endpoint.name.clone(),
                url: endpoint.url.clone(),
            })?;
        }
        Ok(())
    }
}

/// Fetches the configured documents
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    client: reqwest::Client,
}

impl ConfigLoader {
    /// Create a loader with the default fetch timeout
    pub fn new() -> ParseResult<Self> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a loader with a custom fetch timeout
    pub fn with_timeout(timeout: Duration) -> ParseResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParseError::HttpError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Read the config file at `path` and fetch every document it lists
    pub async fn load(&self, path: impl AsRef<Path>) -> ParseResult<Vec<SwaggerSource>> {
        let config = SwaggerConfig::from_file(path)?;
        self.fetch_all(&config).await
    }

    /// Fetch all documents concurrently. The first failure aborts the load.
    pub async fn fetch_all(&self, config: &SwaggerConfig) -> ParseResult<Vec<SwaggerSource>> {
        let sources = try_join_all(config.endpoints.iter().map(|endpoint| async move {
            let schema = self.fetch_document(&endpoint.url).await?;
            Ok::<_, ParseError>(SwaggerSource {
                name: endpoint.name.clone(),
                url: endpoint.url.clone(),
                schema,
            })
        }))
        .await?;

        info!("Loaded {} swagger documents", sources.len());
        Ok(sources)
    }

    /// Fetch one document and parse it into a JSON value
    pub async fn fetch_document(&self, url: &str) -> ParseResult<Value> {
        info!("Fetching swagger document from: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json, application/yaml, text/yaml")
            .send()
            .await
            .map_err(|e| ParseError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ParseError::FetchError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let content = response
            .text()
            .await
            .map_err(|e| ParseError::FetchError(e.to_string()))?;

        parse_document(&content, &content_type, url)
    }
}

/// Parse a fetched document as JSON, or as YAML when the content type or URL says so
pub fn parse_document(content: &str, content_type: &str, url: &str) -> ParseResult<Value> {
    if content_type.contains("yaml") || url.ends_with(".yaml") || url.ends_with(".yml") {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}
