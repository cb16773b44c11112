//! Accessors over untyped document trees and schema node classification

use serde_json::{Map, Value};

/// Presence test used throughout extraction.
///
/// `null`, `false`, `0` and `""` count as absent; empty objects and arrays
/// count as present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Optional-returning field access on JSON values.
///
/// Absent fields and fields of the wrong type both come back as `None`.
pub trait JsonExt {
    /// Field value, if present and truthy
    fn field(&self, key: &str) -> Option<&Value>;
    /// Non-empty string field
    fn field_str(&self, key: &str) -> Option<&str>;
    /// Object field
    fn field_object(&self, key: &str) -> Option<&Map<String, Value>>;
    /// Non-empty array field
    fn field_array(&self, key: &str) -> Option<&[Value]>;
}

impl JsonExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| is_truthy(v))
    }

    fn field_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    fn field_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    fn field_array(&self, key: &str) -> Option<&[Value]> {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .filter(|a| !a.is_empty())
    }
}

/// String formats with a dedicated literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    DateTime,
    Date,
    Email,
    Uuid,
}

impl StringFormat {
    fn parse(format: &str) -> Option<Self> {
        match format {
            "date-time" => Some(StringFormat::DateTime),
            "date" => Some(StringFormat::Date),
            "email" => Some(StringFormat::Email),
            "uuid" => Some(StringFormat::Uuid),
            _ => None,
        }
    }
}

/// The shape of a schema fragment, in resolution order.
///
/// `$ref` beats `type`, and `type` beats the composition keywords; a
/// fragment matching none of them is `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'a> {
    Ref(&'a str),
    Object(Option<&'a Map<String, Value>>),
    Array(Option<&'a Value>),
    String {
        first_enum: Option<&'a Value>,
        format: Option<StringFormat>,
    },
    Number,
    Integer,
    Boolean,
    Null,
    OneOf(&'a Value),
    AnyOf(&'a Value),
    AllOf(&'a [Value]),
    Unrecognized,
}

impl<'a> SchemaNode<'a> {
    /// Classify a schema fragment. Absent and non-object fragments are
    /// `Unrecognized`.
    pub fn classify(node: Option<&'a Value>) -> Self {
        let Some(node) = node.filter(|n| n.is_object()) else {
            return SchemaNode::Unrecognized;
        };

        if let Some(reference) = node.field_str("$ref") {
            return SchemaNode::Ref(reference);
        }

        match node.get("type").and_then(Value::as_str) {
            Some("object") => return SchemaNode::Object(node.field_object("properties")),
            Some("array") => return SchemaNode::Array(node.field("items")),
            Some("string") => {
                return SchemaNode::String {
                    first_enum: node.field_array("enum").and_then(<[Value]>::first),
                    format: node
                        .get("format")
                        .and_then(Value::as_str)
                        .and_then(StringFormat::parse),
                }
            }
            Some("number") => return SchemaNode::Number,
            Some("integer") => return SchemaNode::Integer,
            Some("boolean") => return SchemaNode::Boolean,
            Some("null") => return SchemaNode::Null,
            _ => {}
        }

        if let Some(first) = node.field_array("oneOf").and_then(<[Value]>::first) {
            return SchemaNode::OneOf(first);
        }
        if let Some(first) = node.field_array("anyOf").and_then(<[Value]>::first) {
            return SchemaNode::AnyOf(first);
        }
        if let Some(branches) = node.field_array("allOf") {
            return SchemaNode::AllOf(branches);
        }

        SchemaNode::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(-1.5)));
    }

    #[test]
    fn test_ref_wins_over_type() {
        let node = json!({"$ref": "#/components/schemas/Pet", "type": "string"});
        assert_eq!(
            SchemaNode::classify(Some(&node)),
            SchemaNode::Ref("#/components/schemas/Pet")
        );
    }

    #[test]
    fn test_type_wins_over_composition() {
        let node = json!({"type": "boolean", "oneOf": [{"type": "string"}]});
        assert_eq!(SchemaNode::classify(Some(&node)), SchemaNode::Boolean);
    }

    #[test]
    fn test_empty_composition_is_unrecognized() {
        let node = json!({"oneOf": [], "anyOf": []});
        assert_eq!(SchemaNode::classify(Some(&node)), SchemaNode::Unrecognized);
        assert_eq!(SchemaNode::classify(None), SchemaNode::Unrecognized);
        assert_eq!(SchemaNode::classify(Some(&json!("string"))), SchemaNode::Unrecognized);
    }

    #[test]
    fn test_string_enum_and_format() {
        let node = json!({"type": "string", "enum": ["a", "b"], "format": "uuid"});
        assert_eq!(
            SchemaNode::classify(Some(&node)),
            SchemaNode::String {
                first_enum: Some(&json!("a")),
                format: Some(StringFormat::Uuid),
            }
        );
    }

    #[test]
    fn test_json_ext_wrong_type_is_none() {
        let value = json!({"name": 42, "list": [], "obj": "x"});
        assert_eq!(value.field_str("name"), None);
        assert_eq!(value.field_array("list"), None);
        assert!(value.field_object("obj").is_none());
        assert!(value.field("missing").is_none());
    }
}
