//! Individual value generators for different schema nodes.
//!
//! [`generate_value`] dispatches on the node's [`GeneratorTag`] first. Tagged
//! nodes go to the temporal generators or the vocabulary; untagged nodes go
//! to the generic faker, which follows the node's keywords.

pub mod array;
pub mod choice;
pub mod numeric;
pub mod text;
pub mod timestamp;
pub mod uuid;

use crate::context::TemporalContext;
use crate::generator::GeneratorError;
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::{Map, Value};
use synth_core::{format_instant, GeneratorTag, NodeType, SchemaNode, Vocabulary};

/// Deepest schema nesting followed before giving up (guards recursive `$ref`s).
pub const MAX_DEPTH: usize = 32;

/// Everything a value generator may touch while producing one record.
pub struct GenerationScope<'a, R: Rng> {
    /// Root schema, for `$ref` resolution
    root: &'a SchemaNode,
    vocabulary: &'a Vocabulary,
    now: DateTime<Utc>,
    rng: &'a mut R,
    temporal: &'a mut TemporalContext,
    depth: usize,
}

impl<'a, R: Rng> GenerationScope<'a, R> {
    pub fn new(
        root: &'a SchemaNode,
        vocabulary: &'a Vocabulary,
        now: DateTime<Utc>,
        rng: &'a mut R,
        temporal: &'a mut TemporalContext,
    ) -> Self {
        Self {
            root,
            vocabulary,
            now,
            rng,
            temporal,
            depth: 0,
        }
    }
}

/// Generate a value for `node`.
pub fn generate_value<R: Rng>(
    node: &SchemaNode,
    scope: &mut GenerationScope<'_, R>,
) -> Result<Value, GeneratorError> {
    if scope.depth >= MAX_DEPTH {
        return Err(GeneratorError::DepthExceeded(MAX_DEPTH));
    }

    scope.depth += 1;
    let value = generate_tagged(node, scope);
    scope.depth -= 1;
    value
}

fn generate_tagged<R: Rng>(
    node: &SchemaNode,
    scope: &mut GenerationScope<'_, R>,
) -> Result<Value, GeneratorError> {
    match node.tag {
        GeneratorTag::SessionStart => {
            let start = timestamp::generate_session_start(scope.rng, scope.now, scope.temporal);
            Ok(Value::String(format_instant(&start)))
        }
        GeneratorTag::SessionEnd => {
            let end = timestamp::generate_session_end(scope.rng, scope.temporal)?;
            Ok(Value::String(format_instant(&end)))
        }
        GeneratorTag::PlainTimestamp => {
            let instant = timestamp::generate_activity_time(scope.rng, scope.temporal)?;
            Ok(Value::String(format_instant(&instant)))
        }
        GeneratorTag::Location => Ok(Value::String(
            scope.vocabulary.choose(scope.rng).to_string(),
        )),
        GeneratorTag::None => generate_generic(node, scope),
    }
}

fn generate_generic<R: Rng>(
    node: &SchemaNode,
    scope: &mut GenerationScope<'_, R>,
) -> Result<Value, GeneratorError> {
    if let Some(reference) = &node.reference {
        let root = scope.root;
        let target = root.resolve_ref(reference)?;
        return generate_value(target, scope);
    }

    if let Some(value) = &node.const_value {
        return Ok(value.clone());
    }

    if let Some(values) = &node.enum_values {
        return Ok(choice::generate_one_of(scope.rng, values));
    }

    if let Some(branch) = pick_branch(&node.any_of, scope.rng) {
        return generate_value(branch, scope);
    }

    if let Some(branch) = pick_branch(&node.one_of, scope.rng) {
        return generate_value(branch, scope);
    }

    if !node.all_of.is_empty() {
        return generate_all_of(node, scope);
    }

    match pick_type(node, scope.rng) {
        Some(NodeType::Object) => generate_object(node, scope).map(Value::Object),
        Some(NodeType::Array) => array::generate_array(node, scope),
        Some(NodeType::String) => Ok(text::generate_string(node, scope.rng, scope.now)),
        Some(NodeType::Integer) => Ok(numeric::generate_integer(scope.rng, node)),
        Some(NodeType::Number) => Ok(numeric::generate_number(scope.rng, node)),
        Some(NodeType::Boolean) => Ok(Value::Bool(scope.rng.random_bool(0.5))),
        Some(NodeType::Null) | None => Ok(Value::Null),
    }
}

fn pick_branch<'s, R: Rng>(branches: &'s [SchemaNode], rng: &mut R) -> Option<&'s SchemaNode> {
    branches.choose(rng)
}

/// Choose the type to generate: a declared one, or the one implied by keywords.
fn pick_type<R: Rng>(node: &SchemaNode, rng: &mut R) -> Option<NodeType> {
    if let Some(node_type) = node.declared_types().choose(rng) {
        return Some(*node_type);
    }

    if node.is_object() {
        Some(NodeType::Object)
    } else if node.is_array() {
        Some(NodeType::Array)
    } else if node.is_string() || node.min_length.is_some() || node.max_length.is_some() {
        Some(NodeType::String)
    } else if node.minimum.is_some() || node.maximum.is_some() {
        Some(NodeType::Number)
    } else {
        None
    }
}

/// Generate every property, in declaration order.
fn generate_object<R: Rng>(
    node: &SchemaNode,
    scope: &mut GenerationScope<'_, R>,
) -> Result<Map<String, Value>, GeneratorError> {
    let mut object = Map::new();
    for (name, property) in &node.properties {
        let value = generate_value(property, scope)?;
        object.insert(name.clone(), value);
    }
    Ok(object)
}

/// Generate the node's own properties and every branch, merging object results.
///
/// When no branch produces an object, the last non-object value wins.
fn generate_all_of<R: Rng>(
    node: &SchemaNode,
    scope: &mut GenerationScope<'_, R>,
) -> Result<Value, GeneratorError> {
    let mut merged = generate_object(node, scope)?;
    let mut scalar = None;

    for branch in &node.all_of {
        match generate_value(branch, scope)? {
            Value::Object(object) => merged.extend(object),
            other => scalar = Some(other),
        }
    }

    Ok(match scalar {
        Some(value) if merged.is_empty() => value,
        _ => Value::Object(merged),
    })
}
