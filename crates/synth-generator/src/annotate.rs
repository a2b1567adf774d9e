//! Schema annotation.
//!
//! Walks a schema once and tags the fields that need special generation:
//!
//! | Field | Tag |
//! |---|---|
//! | property named `start_time` | session-start |
//! | property named `end_time` | session-end |
//! | string property with format `date-time` | plain-timestamp |
//! | string property whose format already names a handler | that handler's tag |
//! | string or untyped property named `location` (any case) | location |
//! | any node with the `location` keyword | location |
//!
//! Name rules win over format rules. Temporal tags also rewrite `format` to
//! the handler name, so annotating an annotated schema changes nothing.

use synth_core::schema::{DATE_TIME_FORMAT, LOCATION_FIELD, SESSION_END_FIELD, SESSION_START_FIELD};
use synth_core::{GeneratorTag, SchemaNode};

/// Return an annotated copy of `schema`.
pub fn annotate(schema: &SchemaNode) -> SchemaNode {
    let mut annotated = schema.clone();
    annotate_in_place(&mut annotated);
    annotated
}

/// Annotate `node` and everything below it.
///
/// Recurses into properties, array items, `anyOf` / `oneOf` / `allOf`
/// branches and local definitions.
pub fn annotate_in_place(node: &mut SchemaNode) {
    if node.tag.is_none() && node.location.is_some() {
        node.tag = GeneratorTag::Location;
    }

    for (name, property) in node.properties.iter_mut() {
        if let Some(tag) = property_tag(name, property) {
            apply_tag(property, tag);
        }
    }

    for child in node.children_mut() {
        annotate_in_place(child);
    }
}

fn property_tag(name: &str, property: &SchemaNode) -> Option<GeneratorTag> {
    match name {
        SESSION_START_FIELD => return Some(GeneratorTag::SessionStart),
        SESSION_END_FIELD => return Some(GeneratorTag::SessionEnd),
        _ => {}
    }

    if property.is_string() {
        match property.format.as_deref() {
            Some(DATE_TIME_FORMAT) => return Some(GeneratorTag::PlainTimestamp),
            Some(format) => {
                if let Some(tag) = GeneratorTag::from_format(format) {
                    return Some(tag);
                }
            }
            None => {}
        }
    }

    if name.to_lowercase() == LOCATION_FIELD && is_scalar_location(property) {
        return Some(GeneratorTag::Location);
    }

    None
}

/// A location property we can fill with a label: a string, or an untyped leaf.
fn is_scalar_location(property: &SchemaNode) -> bool {
    if property.reference.is_some() || property.is_composite() {
        return false;
    }
    property.is_string()
        || (property.node_type.is_none() && !property.is_object() && !property.is_array())
}

fn apply_tag(property: &mut SchemaNode, tag: GeneratorTag) {
    property.tag = tag;
    if tag.is_temporal() {
        property.format = tag.handler_name().map(str::to_string);
    }
}
