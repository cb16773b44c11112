//! Registry of loaded swagger documents

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::parser::SwaggerParser;
use crate::types::{SwaggerSource, SwaggerSummary};

/// A registered document
#[derive(Debug, Clone)]
struct SwaggerEntry {
    url: String,
    parser: SwaggerParser,
}

/// Fixed, ordered set of named swagger documents
#[derive(Debug, Clone, Default)]
pub struct SwaggerCollection {
    swaggers: Vec<SwaggerEntry>,
}

impl SwaggerCollection {
    /// Register `sources` in order, using the system clock for samples
    pub fn new(sources: Vec<SwaggerSource>) -> Self {
        Self::with_clock(sources, Arc::new(SystemClock))
    }

    /// Register `sources` in order, sharing `clock` across all parsers
    pub fn with_clock(sources: Vec<SwaggerSource>, clock: Arc<dyn Clock>) -> Self {
        let mut seen = HashSet::new();
        let swaggers: Vec<SwaggerEntry> = sources
            .into_iter()
            .map(|source| {
                if !seen.insert(source.name.clone()) {
                    warn!(
                        "Duplicate swagger id '{}'; lookups resolve to the first one",
                        source.name
                    );
                }
                SwaggerEntry {
                    url: source.url,
                    parser: SwaggerParser::new(source.name, source.schema)
                        .with_clock(Arc::clone(&clock)),
                }
            })
            .collect();

        info!("Registered {} swagger documents", swaggers.len());
        Self { swaggers }
    }

    /// List registered documents in registration order
    pub fn list(&self) -> Vec<SwaggerSummary> {
        self.swaggers
            .iter()
            .map(|entry| SwaggerSummary {
                id: entry.parser.name().to_string(),
                url: entry.url.clone(),
                title: entry.parser.title().map(str::to_string),
            })
            .collect()
    }

    /// Look up a document by id (first match wins)
    pub fn get(&self, id: &str) -> Option<&SwaggerParser> {
        self.swaggers
            .iter()
            .find(|entry| entry.parser.name() == id)
            .map(|entry| &entry.parser)
    }

    /// Ids of all registered documents, in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.swaggers.iter().map(|entry| entry.parser.name())
    }

    pub fn len(&self) -> usize {
        self.swaggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaggers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(name: &str, title: Option<&str>, op: &str) -> SwaggerSource {
        let mut schema = json!({"paths": {"/x": {"get": {"operationId": op}}}});
        if let Some(title) = title {
            schema["info"] = json!({"title": title});
        }
        SwaggerSource {
            name: name.to_string(),
            url: format!("https://example.com/{}.json", name),
            schema,
        }
    }

    #[test]
    fn test_list() {
        let collection = SwaggerCollection::new(vec![
            source("pets", Some("Petstore"), "a"),
            source("users-api", None, "b"),
        ]);

        let list = collection.list();
        assert_eq!(list.len(), 2);
        assert_eq!(
            list[0],
            SwaggerSummary {
                id: "pets".to_string(),
                url: "https://example.com/pets.json".to_string(),
                title: Some("Petstore".to_string()),
            }
        );
        assert_eq!(list[1].id, "users-api");
        assert_eq!(list[1].title, None);
    }

    #[test]
    fn test_get() {
        let collection = SwaggerCollection::new(vec![source("pets", None, "a")]);

        let parser = collection.get("pets").unwrap();
        assert_eq!(parser.name(), "pets");
        assert_eq!(parser.list_endpoints()[0].operation_id, "a");
        assert!(collection.get("Pets").is_none());
    }

    #[test]
    fn test_duplicates_resolve_to_first() {
        let collection = SwaggerCollection::new(vec![
            source("pets", None, "first"),
            source("pets", None, "second"),
        ]);

        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.get("pets").unwrap().list_endpoints()[0].operation_id,
            "first"
        );
        assert_eq!(collection.ids().collect::<Vec<_>>(), ["pets", "pets"]);
    }

    #[test]
    fn test_with_clock_reaches_every_parser() {
        use crate::clock::FixedClock;
        use chrono::{TimeZone, Utc};

        let clock = FixedClock(Utc.with_ymd_and_hms(2023, 11, 2, 8, 30, 0).unwrap());
        let schema = json!({"paths": {"/events": {"get": {
            "operationId": "listEvents",
            "responses": {"200": {"content": {"application/json": {"schema": {
                "type": "object",
                "properties": {"at": {"type": "string", "format": "date-time"}}
            }}}}}
        }}}});
        let collection = SwaggerCollection::with_clock(
            vec![SwaggerSource {
                name: "events".to_string(),
                url: "https://example.com/events.json".to_string(),
                schema,
            }],
            Arc::new(clock),
        );

        let endpoints = collection.get("events").unwrap().list_endpoints();
        assert_eq!(
            endpoints[0].success_example_response,
            json!({"at": "2023-11-02T08:30:00.000Z"})
        );
    }

    #[test]
    fn test_empty() {
        let collection = SwaggerCollection::default();
        assert!(collection.is_empty());
        assert!(collection.list().is_empty());
    }
}
