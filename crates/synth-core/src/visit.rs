//! Mutable walks over generated value trees.
//!
//! Records are plain `serde_json::Value` trees. The passes that repair a
//! record after generation all need the same traversal: every object and
//! every array, parents before children, in document order. [`walk_mut`]
//! provides it once and hands each container to a [`ValueVisitor`] together
//! with its JSON pointer (RFC 6901) inside the record, so a visitor can come
//! back to the same container later through `Value::pointer_mut`.

use serde_json::{Map, Value};

/// Callbacks for containers met during a walk.
///
/// Children are visited after the callback returns, so a visitor may rewrite
/// or reorder a container's entries and the walk follows the new contents.
pub trait ValueVisitor {
    fn visit_object(&mut self, _pointer: &str, _object: &mut Map<String, Value>) {}

    fn visit_array(&mut self, _pointer: &str, _array: &mut Vec<Value>) {}
}

/// Walk `value` depth-first in document order.
pub fn walk_mut<V: ValueVisitor + ?Sized>(value: &mut Value, visitor: &mut V) {
    let mut pointer = String::new();
    walk_at(value, &mut pointer, visitor);
}

/// Call `f` on every object in `value`, parents first.
pub fn for_each_object_mut<F>(value: &mut Value, f: F)
where
    F: FnMut(&str, &mut Map<String, Value>),
{
    struct ObjectFn<F>(F);

    impl<F: FnMut(&str, &mut Map<String, Value>)> ValueVisitor for ObjectFn<F> {
        fn visit_object(&mut self, pointer: &str, object: &mut Map<String, Value>) {
            (self.0)(pointer, object)
        }
    }

    walk_mut(value, &mut ObjectFn(f));
}

fn walk_at<V: ValueVisitor + ?Sized>(value: &mut Value, pointer: &mut String, visitor: &mut V) {
    match value {
        Value::Object(object) => {
            visitor.visit_object(pointer, object);
            for (key, child) in object.iter_mut() {
                let len = pointer.len();
                pointer.push('/');
                push_escaped(pointer, key);
                walk_at(child, pointer, visitor);
                pointer.truncate(len);
            }
        }
        Value::Array(items) => {
            visitor.visit_array(pointer, items);
            for (index, child) in items.iter_mut().enumerate() {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&index.to_string());
                walk_at(child, pointer, visitor);
                pointer.truncate(len);
            }
        }
        _ => {}
    }
}

/// Append a key as a JSON-pointer reference token.
fn push_escaped(pointer: &mut String, key: &str) {
    for c in key.chars() {
        match c {
            '~' => pointer.push_str("~0"),
            '/' => pointer.push_str("~1"),
            c => pointer.push(c),
        }
    }
}
