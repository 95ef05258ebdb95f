//! Parameter schema model
//!
//! A small recursive description of JSON value shapes, rendered as JSON
//! Schema for `tools/list` and consulted for required fields before a tool
//! is invoked.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Shape of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Fields in declaration order plus the names that must be present
    Object {
        properties: Vec<(String, SchemaNode)>,
        required: Vec<String>,
    },
    Array {
        items: Box<SchemaNode>,
    },
    String,
    Boolean,
    Integer,
    /// A string restricted to a fixed set of values
    Enum {
        values: Vec<String>,
    },
}

/// A node in a parameter schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub description: Option<String>,
}

impl SchemaNode {
    /// A node of `kind` with no description, e.g. array elements.
    pub fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    fn leaf(kind: SchemaKind, description: &str) -> Self {
        Self {
            kind,
            description: Some(description.to_string()),
        }
    }

    /// An object with no fields yet.
    pub fn object() -> Self {
        Self {
            kind: SchemaKind::Object {
                properties: Vec::new(),
                required: Vec::new(),
            },
            description: None,
        }
    }

    pub fn string(description: &str) -> Self {
        Self::leaf(SchemaKind::String, description)
    }

    pub fn boolean(description: &str) -> Self {
        Self::leaf(SchemaKind::Boolean, description)
    }

    pub fn integer(description: &str) -> Self {
        Self::leaf(SchemaKind::Integer, description)
    }

    pub fn enumeration(values: &[&str], description: &str) -> Self {
        Self::leaf(
            SchemaKind::Enum {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
            description,
        )
    }

    pub fn array(items: SchemaNode, description: &str) -> Self {
        Self::leaf(
            SchemaKind::Array {
                items: Box::new(items),
            },
            description,
        )
    }

    /// Add an optional field. Only meaningful on objects; ignored otherwise.
    pub fn property(mut self, name: &str, node: SchemaNode) -> Self {
        debug_assert!(matches!(self.kind, SchemaKind::Object { .. }));
        if let SchemaKind::Object { properties, .. } = &mut self.kind {
            properties.push((name.to_string(), node));
        }
        self
    }

    /// Add a field that must be present.
    pub fn required_property(mut self, name: &str, node: SchemaNode) -> Self {
        self = self.property(name, node);
        if let SchemaKind::Object { required, .. } = &mut self.kind {
            required.push(name.to_string());
        }
        self
    }

    /// Required field names in declaration order; empty for non-objects.
    pub fn required_fields(&self) -> &[String] {
        match &self.kind {
            SchemaKind::Object { required, .. } => required,
            _ => &[],
        }
    }

    /// Render as JSON Schema.
    pub fn to_json(&self) -> Value {
        let mut out = match &self.kind {
            SchemaKind::Object {
                properties,
                required,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_json()))
                    .collect();
                let mut obj = json!({ "type": "object", "properties": props });
                if !required.is_empty() {
                    obj["required"] = json!(required);
                }
                obj
            }
            SchemaKind::Array { items } => json!({ "type": "array", "items": items.to_json() }),
            SchemaKind::String => json!({ "type": "string" }),
            SchemaKind::Boolean => json!({ "type": "boolean" }),
            SchemaKind::Integer => json!({ "type": "integer" }),
            SchemaKind::Enum { values } => json!({ "type": "string", "enum": values }),
        };
        if let Some(description) = &self.description {
            out["description"] = json!(description);
        }
        out
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
