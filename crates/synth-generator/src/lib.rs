//! Constrained record generator for session-synth.
//!
//! This crate turns a JSON-Schema-like [`SchemaNode`](synth_core::SchemaNode)
//! into fake records whose temporal fields are consistent with each other and
//! whose location fields come from a reference [`Vocabulary`](synth_core::Vocabulary).
//! Generation is seeded, so the same seed, reference instant and schema give
//! the same records.
//!
//! # Architecture
//!
//! ```text
//! SchemaNode (JSON/YAML)
//!        │
//!        ▼
//!   annotate()            start_time / end_time / date-time / location tags
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ SampleGenerator  │◄── &mut TemporalContext (fresh per record)
//! └────────┬─────────┘
//!          ▼
//!   substitute_locations()
//!          ▼
//!   normalize_timestamps()
//!          ▼
//!    BatchDriver ──► Vec<serde_json::Value>
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use synth_core::{SchemaNode, Vocabulary};
//! use synth_generator::{BatchDriver, SampleGenerator};
//!
//! let schema = SchemaNode::from_json(r#"{
//!     "type": "object",
//!     "properties": {
//!         "start_time": { "type": "string", "format": "date-time" },
//!         "end_time": { "type": "string", "format": "date-time" },
//!         "activities": {
//!             "type": "array",
//!             "items": {
//!                 "type": "object",
//!                 "properties": {
//!                     "time_stamp": { "type": "string", "format": "date-time" },
//!                     "location": { "type": "string" }
//!                 }
//!             }
//!         }
//!     }
//! }"#).unwrap();
//! let vocabulary = Arc::new(Vocabulary::new(["Paris", "Tokyo"]).unwrap());
//!
//! let generator = SampleGenerator::new(&schema, vocabulary);
//! let mut driver = BatchDriver::new(generator, 42);
//! let report = driver.run(3).unwrap();
//! assert_eq!(report.records.len(), 3);
//! ```
//!
//! # Generator tags
//!
//! - `session-start-time` - now minus 1 to 365 days, opens the record interval
//! - `session-end-time` - start plus 30 to 209 minutes, closes the interval
//! - `activity-time` - uniform instant inside the interval
//! - `location` - label from the vocabulary

pub mod annotate;
pub mod batch;
pub mod context;
pub mod generator;
pub mod generators;
pub mod passes;
pub mod verify;

// Re-exports for convenience
pub use annotate::{annotate, annotate_in_place};
pub use batch::{BatchDriver, BatchError, BatchOptions, BatchReport, FailurePolicy, RecordFailure};
pub use context::TemporalContext;
pub use generator::{GeneratorError, SampleGenerator};
pub use passes::location::substitute_locations;
pub use passes::timestamp::{normalize_timestamps, Normalization, TimestampOrdering};
pub use verify::{verify_record, Violation};
