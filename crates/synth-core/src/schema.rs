//! Schema definitions for the session-synth framework.
//!
//! A [`SchemaNode`] is one node of a JSON-Schema-like description of a
//! record. The subset understood here is the one the generator needs:
//!
//! - `type` (single type or a list of alternatives)
//! - `properties`, `required` for objects (property order is preserved)
//! - `items`, `minItems`, `maxItems` for arrays
//! - `format`, `minLength`, `maxLength` for strings
//! - `minimum`, `maximum` for integers and numbers
//! - `enum`, `const`
//! - `anyOf`, `oneOf`, `allOf`
//! - local `$ref` into `definitions` / `$defs`
//! - the `location` keyword, marking a node as drawn from the vocabulary
//!
//! Everything else in the document (titles, descriptions, `$schema`, ...) is
//! ignored.
//!
//! Every node also carries a [`GeneratorTag`]. Tags are never read from the
//! input document; they are assigned by the annotator in `synth-generator`.

use crate::document::{parse_document, DocumentError, DocumentFormat};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// Field holding a record's session start instant.
pub const SESSION_START_FIELD: &str = "start_time";

/// Field holding a record's session end instant.
pub const SESSION_END_FIELD: &str = "end_time";

/// Field holding a nested event instant.
pub const TIMESTAMP_FIELD: &str = "time_stamp";

/// Field name (compared case-insensitively) of vocabulary-backed values.
pub const LOCATION_FIELD: &str = "location";

/// Generic JSON-Schema date-time format marker.
pub const DATE_TIME_FORMAT: &str = "date-time";

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error decoding the schema document
    #[error("Failed to parse schema: {0}")]
    ParseError(#[from] DocumentError),

    /// `$ref` that does not point at the root or a local definition
    #[error("Unresolved schema reference: {0}")]
    UnresolvedRef(String),
}

// ============================================================================
// Generator Tags
// ============================================================================

/// Special generation behavior attached to a schema node.
///
/// The set is closed: every behavior that is not the generic faker is one of
/// these variants, and dispatch over them is an exhaustive `match`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorTag {
    /// Generic schema-conformant value
    #[default]
    None,
    /// Opens the record's interval (`start_time`)
    SessionStart,
    /// Closes the record's interval (`end_time`)
    SessionEnd,
    /// Instant inside the record's interval
    PlainTimestamp,
    /// Label drawn from the reference vocabulary
    Location,
}

impl GeneratorTag {
    pub fn is_none(&self) -> bool {
        matches!(self, GeneratorTag::None)
    }

    /// Name of the format (or, for locations, the custom type) handling this tag.
    pub fn handler_name(&self) -> Option<&'static str> {
        match self {
            GeneratorTag::None => None,
            GeneratorTag::SessionStart => Some("session-start-time"),
            GeneratorTag::SessionEnd => Some("session-end-time"),
            GeneratorTag::PlainTimestamp => Some("activity-time"),
            GeneratorTag::Location => Some("location"),
        }
    }

    /// Tag for a format string that already names one of the temporal handlers.
    pub fn from_format(format: &str) -> Option<Self> {
        match format {
            "session-start-time" => Some(GeneratorTag::SessionStart),
            "session-end-time" => Some(GeneratorTag::SessionEnd),
            "activity-time" => Some(GeneratorTag::PlainTimestamp),
            _ => None,
        }
    }

    /// Whether the tag reads or writes the record's temporal context.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            GeneratorTag::SessionStart | GeneratorTag::SessionEnd | GeneratorTag::PlainTimestamp
        )
    }
}

impl fmt::Display for GeneratorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name().unwrap_or("none"))
    }
}

// ============================================================================
// Schema Nodes
// ============================================================================

/// Primitive JSON-Schema type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

/// The `type` keyword: either one type or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    Single(NodeType),
    Union(Vec<NodeType>),
}

impl TypeSpec {
    /// All declared types.
    pub fn types(&self) -> &[NodeType] {
        match self {
            TypeSpec::Single(t) => std::slice::from_ref(t),
            TypeSpec::Union(ts) => ts,
        }
    }

    pub fn contains(&self, node_type: NodeType) -> bool {
        self.types().contains(&node_type)
    }
}

/// One node of a record schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Declared type(s)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<TypeSpec>,

    /// Object properties in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,

    /// Required property names (all properties are generated regardless)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Array element schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    /// String format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Allowed values
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Single allowed value
    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaNode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaNode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaNode>,

    /// Local reference (`#`, `#/definitions/<name>`, `#/$defs/<name>`)
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, SchemaNode>,

    #[serde(rename = "$defs", default, skip_serializing_if = "IndexMap::is_empty")]
    pub defs: IndexMap<String, SchemaNode>,

    /// Custom `location` keyword; its value is not inspected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,

    /// Generation behavior assigned by annotation (output only)
    #[serde(
        rename = "x-generator",
        default,
        skip_deserializing,
        skip_serializing_if = "GeneratorTag::is_none"
    )]
    pub tag: GeneratorTag,
}

impl SchemaNode {
    /// Load a schema from a JSON or YAML file (chosen by extension).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let format = DocumentFormat::from_path(&path);
        let content = fs::read_to_string(path)?;
        Ok(parse_document(&content, format)?)
    }

    /// Parse a schema from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(parse_document(json, DocumentFormat::Json)?)
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(parse_document(yaml, DocumentFormat::Yaml)?)
    }

    /// Get a property schema by name.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// Get a nested property by path, e.g. `["activities", "[]", "location"]`.
    ///
    /// The segment `[]` steps into array items.
    pub fn lookup(&self, path: &[&str]) -> Option<&SchemaNode> {
        path.iter().try_fold(self, |node, segment| match *segment {
            "[]" => node.items.as_deref(),
            name => node.properties.get(name),
        })
    }

    /// Declared types, or an empty slice when `type` is absent.
    pub fn declared_types(&self) -> &[NodeType] {
        self.node_type.as_ref().map(TypeSpec::types).unwrap_or(&[])
    }

    /// Whether the node describes an object (declared, or implied by `properties`).
    pub fn is_object(&self) -> bool {
        match &self.node_type {
            Some(types) => types.contains(NodeType::Object),
            None => !self.properties.is_empty(),
        }
    }

    /// Whether the node describes an array (declared, or implied by `items`).
    pub fn is_array(&self) -> bool {
        match &self.node_type {
            Some(types) => types.contains(NodeType::Array),
            None => self.items.is_some(),
        }
    }

    /// Whether the node may hold a string (declared, or implied by `format`).
    pub fn is_string(&self) -> bool {
        match &self.node_type {
            Some(types) => types.contains(NodeType::String),
            None => self.format.is_some(),
        }
    }

    /// Whether the node has any `anyOf` / `oneOf` / `allOf` branches.
    pub fn is_composite(&self) -> bool {
        !(self.any_of.is_empty() && self.one_of.is_empty() && self.all_of.is_empty())
    }

    /// Resolve a local `$ref` against this (root) node.
    pub fn resolve_ref(&self, reference: &str) -> Result<&SchemaNode, SchemaError> {
        if reference == "#" {
            return Ok(self);
        }

        let unresolved = || SchemaError::UnresolvedRef(reference.to_string());
        let (table, name) = if let Some(name) = reference.strip_prefix("#/definitions/") {
            (&self.definitions, name)
        } else if let Some(name) = reference.strip_prefix("#/$defs/") {
            (&self.defs, name)
        } else {
            return Err(unresolved());
        };

        table.get(&unescape_pointer_token(name)).ok_or_else(unresolved)
    }

    /// Mutable access to every direct child schema.
    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut SchemaNode> {
        self.properties
            .values_mut()
            .chain(self.items.as_deref_mut())
            .chain(self.any_of.iter_mut())
            .chain(self.one_of.iter_mut())
            .chain(self.all_of.iter_mut())
            .chain(self.definitions.values_mut())
            .chain(self.defs.values_mut())
    }
}

/// Undo JSON-pointer escaping (`~1` -> `/`, `~0` -> `~`).
fn unescape_pointer_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

// ============================================================================
// Tests
// ============================================================================
