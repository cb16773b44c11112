//! Example value synthesis from JSON schema fragments

use chrono::SecondsFormat;
use serde_json::{json, Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::schema::{is_truthy, JsonExt, SchemaNode, StringFormat};

/// Prefix of the only reference form that is dereferenced
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Builds one representative value for a schema fragment.
///
/// References resolve against `components.schemas` of the document the
/// synthesizer was created for. A reference that is already being expanded
/// further up the current branch resolves to `{}`, so cyclic schemas
/// terminate.
pub struct SampleSynthesizer<'a> {
    /// Component schemas of the owning document
    schemas: Option<&'a Map<String, Value>>,
    clock: &'a dyn Clock,
}

impl<'a> SampleSynthesizer<'a> {
    /// Create a synthesizer resolving references against `document`
    pub fn new(document: &'a Value, clock: &'a dyn Clock) -> Self {
        let schemas = document
            .get("components")
            .and_then(|c| c.field_object("schemas"));

        Self { schemas, clock }
    }

    /// Synthesize an example for `node`. Never fails; absent input gives `{}`.
    pub fn synthesize(&self, node: Option<&Value>) -> Value {
        let mut expanding = Vec::new();
        self.sample(node, &mut expanding)
    }

    fn sample(&self, node: Option<&Value>, expanding: &mut Vec<String>) -> Value {
        match SchemaNode::classify(node) {
            SchemaNode::Ref(reference) => self.sample_ref(reference, expanding),
            SchemaNode::Object(properties) => {
                let mut result = Map::new();
                for (name, property) in properties.into_iter().flatten() {
                    result.insert(name.clone(), self.sample(Some(property), expanding));
                }
                Value::Object(result)
            }
            SchemaNode::Array(items) => match items {
                Some(items) => Value::Array(vec![self.sample(Some(items), expanding)]),
                None => Value::Array(Vec::new()),
            },
            SchemaNode::String { first_enum, format } => {
                if let Some(value) = first_enum {
                    return value.clone();
                }
                Value::String(self.sample_string(format))
            }
            SchemaNode::Number | SchemaNode::Integer => json!(0),
            SchemaNode::Boolean => Value::Bool(false),
            SchemaNode::Null => Value::Null,
            SchemaNode::OneOf(first) | SchemaNode::AnyOf(first) => {
                self.sample(Some(first), expanding)
            }
            SchemaNode::AllOf(branches) => {
                let mut merged = Map::new();
                for branch in branches {
                    // Non-object branch samples do not contribute keys
                    if let Value::Object(fields) = self.sample(Some(branch), expanding) {
                        merged.extend(fields);
                    }
                }
                Value::Object(merged)
            }
            SchemaNode::Unrecognized => Value::Object(Map::new()),
        }
    }

    fn sample_ref(&self, reference: &str, expanding: &mut Vec<String>) -> Value {
        let Some(name) = reference.strip_prefix(SCHEMA_REF_PREFIX) else {
            debug!("Unsupported reference: {}", reference);
            return Value::Object(Map::new());
        };

        let Some(resolved) = self
            .schemas
            .and_then(|schemas| schemas.get(name))
            .filter(|s| is_truthy(s))
        else {
            debug!("Unresolved reference: {}", reference);
            return Value::Object(Map::new());
        };

        if expanding.iter().any(|n| n == name) {
            debug!("Cyclic reference to {}, using empty sample", name);
            return Value::Object(Map::new());
        }

        expanding.push(name.to_string());
        let sample = self.sample(Some(resolved), expanding);
        expanding.pop();
        sample
    }

    fn sample_string(&self, format: Option<StringFormat>) -> String {
        match format {
            Some(StringFormat::DateTime) => self
                .clock
                .now()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            Some(StringFormat::Date) => self.clock.now().format("%Y-%m-%d").to_string(),
            Some(StringFormat::Email) => "user@example.com".to_string(),
            Some(StringFormat::Uuid) => Uuid::nil().to_string(),
            None => "string".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    fn synthesize(document: &Value, node: Value) -> Value {
        SampleSynthesizer::new(document, &SystemClock).synthesize(Some(&node))
    }

    #[test]
    fn test_object_properties() {
        let sample = synthesize(
            &json!({}),
            json!({
                "type": "object",
                "properties": {"a": {"type": "integer"}, "b": {"type": "boolean"}}
            }),
        );
        assert_eq!(sample, json!({"a": 0, "b": false}));
    }

    #[test]
    fn test_object_keeps_declaration_order() {
        let sample = synthesize(
            &json!({}),
            json!({
                "type": "object",
                "properties": {"zeta": {"type": "null"}, "alpha": {"type": "number"}}
            }),
        );
        let keys: Vec<&String> = sample.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_array_items() {
        let sample = synthesize(&json!({}), json!({"type": "array", "items": {"type": "string"}}));
        assert_eq!(sample, json!(["string"]));

        let sample = synthesize(&json!({}), json!({"type": "array"}));
        assert_eq!(sample, json!([]));
    }

    #[test]
    fn test_string_variants() {
        let doc = json!({});
        assert_eq!(synthesize(&doc, json!({"type": "string"})), json!("string"));
        assert_eq!(
            synthesize(&doc, json!({"type": "string", "enum": ["available", "sold"]})),
            json!("available")
        );
        assert_eq!(
            synthesize(&doc, json!({"type": "string", "enum": [], "format": "email"})),
            json!("user@example.com")
        );
        assert_eq!(
            synthesize(&doc, json!({"type": "string", "format": "uuid"})),
            json!("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(
            synthesize(&doc, json!({"type": "string", "format": "hostname"})),
            json!("string")
        );
    }

    #[test]
    fn test_date_formats_use_clock() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap());
        let doc = json!({});
        let synthesizer = SampleSynthesizer::new(&doc, &clock);

        assert_eq!(
            synthesizer.synthesize(Some(&json!({"type": "string", "format": "date-time"}))),
            json!("2024-03-09T14:05:07.000Z")
        );
        assert_eq!(
            synthesizer.synthesize(Some(&json!({"type": "string", "format": "date"}))),
            json!("2024-03-09")
        );
    }

    #[test]
    fn test_scalars() {
        let doc = json!({});
        assert_eq!(synthesize(&doc, json!({"type": "number"})), json!(0));
        assert_eq!(synthesize(&doc, json!({"type": "integer"})), json!(0));
        assert_eq!(synthesize(&doc, json!({"type": "boolean"})), json!(false));
        assert_eq!(synthesize(&doc, json!({"type": "null"})), Value::Null);
    }

    #[test]
    fn test_absent_and_unrecognized() {
        let doc = json!({});
        let synthesizer = SampleSynthesizer::new(&doc, &SystemClock);
        assert_eq!(synthesizer.synthesize(None), json!({}));
        assert_eq!(synthesize(&doc, json!({"description": "anything"})), json!({}));
        assert_eq!(synthesize(&doc, json!({"type": ["string", "null"]})), json!({}));
    }

    #[test]
    fn test_ref_resolution() {
        let doc = json!({
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}
                    }
                }
            }
        });
        let sample = synthesize(&doc, json!({"$ref": "#/components/schemas/Pet"}));
        assert_eq!(sample, json!({"id": 0, "name": "string"}));
    }

    #[test]
    fn test_missing_or_foreign_ref_is_empty() {
        let doc = json!({"components": {"schemas": {}}, "definitions": {"Pet": {"type": "string"}}});
        assert_eq!(synthesize(&doc, json!({"$ref": "#/components/schemas/Nope"})), json!({}));
        assert_eq!(synthesize(&doc, json!({"$ref": "#/definitions/Pet"})), json!({}));
        assert_eq!(synthesize(&json!({}), json!({"$ref": "#/components/schemas/Pet"})), json!({}));
    }

    #[test]
    fn test_cyclic_ref_terminates() {
        let doc = json!({
            "components": {
                "schemas": {
                    "Node": {
                        "type": "object",
                        "properties": {
                            "value": {"type": "integer"},
                            "next": {"$ref": "#/components/schemas/Node"}
                        }
                    }
                }
            }
        });
        let sample = synthesize(&doc, json!({"$ref": "#/components/schemas/Node"}));
        assert_eq!(sample, json!({"value": 0, "next": {}}));
    }

    #[test]
    fn test_sibling_refs_both_expand() {
        let doc = json!({
            "components": {
                "schemas": {
                    "Money": {"type": "object", "properties": {"amount": {"type": "number"}}},
                    "Order": {
                        "type": "object",
                        "properties": {
                            "subtotal": {"$ref": "#/components/schemas/Money"},
                            "total": {"$ref": "#/components/schemas/Money"}
                        }
                    }
                }
            }
        });
        let sample = synthesize(&doc, json!({"$ref": "#/components/schemas/Order"}));
        assert_eq!(sample, json!({"subtotal": {"amount": 0}, "total": {"amount": 0}}));
    }

    #[test]
    fn test_one_of_and_any_of_take_first_branch() {
        let doc = json!({});
        assert_eq!(
            synthesize(&doc, json!({"oneOf": [{"type": "integer"}, {"type": "string"}]})),
            json!(0)
        );
        assert_eq!(
            synthesize(&doc, json!({"anyOf": [{"type": "boolean"}, {"type": "string"}]})),
            json!(false)
        );
        assert_eq!(
            synthesize(&doc, json!({"oneOf": [], "anyOf": [{"type": "null"}]})),
            Value::Null
        );
    }

    #[test]
    fn test_all_of_later_branch_overwrites() {
        let sample = synthesize(
            &json!({}),
            json!({
                "allOf": [
                    {"type": "object", "properties": {"a": {"type": "string"}}},
                    {"type": "object", "properties": {"a": {"type": "integer"}, "b": {"type": "boolean"}}}
                ]
            }),
        );
        assert_eq!(sample, json!({"a": 0, "b": false}));
    }

    #[test]
    fn test_all_of_drops_non_object_branches() {
        let sample = synthesize(
            &json!({}),
            json!({
                "allOf": [
                    {"type": "string"},
                    {"type": "array", "items": {"type": "integer"}},
                    {"type": "object", "properties": {"id": {"type": "integer"}}}
                ]
            }),
        );
        assert_eq!(sample, json!({"id": 0}));
    }

    #[test]
    fn test_pure_for_time_independent_fragments() {
        let doc = json!({});
        let node = json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string", "enum": ["x"]}},
                "meta": {"allOf": [{"type": "object", "properties": {"k": {"type": "number"}}}]}
            }
        });
        assert_eq!(synthesize(&doc, node.clone()), synthesize(&doc, node));
    }
}
