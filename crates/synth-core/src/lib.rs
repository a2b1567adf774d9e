//! Core types for the session-synth framework.
//!
//! This crate provides the foundational types used by the generator and the
//! command-line tool:
//!
//! - [`SchemaNode`] - JSON-Schema-like record description with [`GeneratorTag`]s
//! - [`Vocabulary`] - Reference labels for location fields
//! - [`Interval`] - A record's `[start_time, end_time]` bounds
//! - [`visit`] - Mutable walks over generated `serde_json::Value` trees
//!
//! # Architecture
//!
//! ```text
//! synth-core (this crate)
//!    │
//!    ├─── synth-generator  (annotation, generation, normalization passes)
//!    │
//!    └─── session-synth    (CLI, input loading, output writing)
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::{GeneratorTag, SchemaNode};
//!
//! let schema = SchemaNode::from_json(r#"{
//!     "type": "object",
//!     "properties": {
//!         "start_time": { "type": "string", "format": "date-time" }
//!     }
//! }"#).unwrap();
//!
//! let start = schema.property("start_time").unwrap();
//! assert_eq!(start.tag, GeneratorTag::None);
//! ```

pub mod document;
pub mod schema;
pub mod time;
pub mod visit;
pub mod vocabulary;

// Re-exports for convenience
pub use document::DocumentFormat;
pub use schema::{
    GeneratorTag, NodeType, SchemaError, SchemaNode, TypeSpec, DATE_TIME_FORMAT, LOCATION_FIELD,
    SESSION_END_FIELD, SESSION_START_FIELD, TIMESTAMP_FIELD,
};
pub use time::{format_instant, instant_of, parse_instant, Interval};
pub use visit::{for_each_object_mut, walk_mut, ValueVisitor};
pub use vocabulary::{LocationEntry, Vocabulary, VocabularyError};
