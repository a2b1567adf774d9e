//! Array value generators.

use super::{generate_value, GenerationScope};
use crate::generator::GeneratorError;
use rand::Rng;
use serde_json::Value;
use synth_core::SchemaNode;

/// Element count when `minItems` is absent.
pub const DEFAULT_MIN_ITEMS: usize = 1;

/// Element count when `maxItems` is absent.
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Pick an element count honoring `minItems` / `maxItems`.
pub fn array_length<R: Rng>(rng: &mut R, node: &SchemaNode) -> usize {
    let max_length = node
        .max_items
        .unwrap_or_else(|| node.min_items.unwrap_or(DEFAULT_MIN_ITEMS).max(DEFAULT_MAX_ITEMS));
    let min_length = node.min_items.unwrap_or(DEFAULT_MIN_ITEMS).min(max_length);

    rng.random_range(min_length..=max_length)
}

/// Generate an array whose elements follow the node's `items` schema.
///
/// Elements are generated in order, so temporal fields inside them see the
/// interval opened by earlier fields of the record.
pub fn generate_array<R: Rng>(
    node: &SchemaNode,
    scope: &mut GenerationScope<'_, R>,
) -> Result<Value, GeneratorError> {
    let Some(items) = node.items.as_deref() else {
        return Ok(Value::Array(vec![]));
    };

    let length = array_length(scope.rng, node);
    let elements = (0..length)
        .map(|_| generate_value(items, scope))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Value::Array(elements))
}
