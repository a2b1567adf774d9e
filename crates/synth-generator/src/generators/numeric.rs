//! Numeric value generators.

use rand::Rng;
use serde_json::{Number, Value};
use synth_core::SchemaNode;

/// Width of the default range when a bound is missing.
pub const DEFAULT_SPAN: f64 = 1000.0;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> Value {
    if min >= max {
        return Value::from(min);
    }
    Value::from(rng.random_range(min..=max))
}

/// Generate a random float in the given range (inclusive).
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> Value {
    let value = if min >= max {
        min
    } else {
        rng.random_range(min..=max)
    };
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Generate an integer honoring the node's `minimum` / `maximum`.
///
/// Null when no integer lies between the bounds.
pub fn generate_integer<R: Rng>(rng: &mut R, node: &SchemaNode) -> Value {
    let (min, max) = bounds(node);
    let (low, high) = (min.ceil(), max.floor());
    if low > high {
        return Value::Null;
    }
    generate_int_range(rng, low as i64, high as i64)
}

/// Generate a number honoring the node's `minimum` / `maximum`.
///
/// Null when `minimum` exceeds `maximum`.
pub fn generate_number<R: Rng>(rng: &mut R, node: &SchemaNode) -> Value {
    let (min, max) = bounds(node);
    if min > max {
        return Value::Null;
    }
    generate_float_range(rng, min, max)
}

/// Resolve the inclusive range, filling a missing side with [`DEFAULT_SPAN`].
fn bounds(node: &SchemaNode) -> (f64, f64) {
    match (node.minimum, node.maximum) {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) => (min, min + DEFAULT_SPAN),
        (None, Some(max)) => (max - DEFAULT_SPAN, max),
        (None, None) => (0.0, DEFAULT_SPAN),
    }
}
