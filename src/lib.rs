//! SessionSynth Library
//!
//! Generates fake user-session records from a JSON-Schema-like document.
//! Every record carries a session interval (`start_time` / `end_time`), all
//! nested `time_stamp` fields fall inside that interval, and every field
//! named "location" holds a label from a reference vocabulary.
//!
//! # Crates
//!
//! - `synth_core` - schema model, vocabulary, instants and value tree walks
//! - `synth_generator` - annotation, sample generation, post-passes, batches
//!
//! This crate holds the CLI glue: argument definitions, input loading and
//! output writing.
//!
//! # CLI Usage
//!
//! ```bash
//! # Generate 10 records with the default paths
//! session-synth generate
//!
//! # Generate 500 records, sorting activity arrays by time
//! session-synth generate --schema schemas/schema.json \
//!   --locations data/locations.json \
//!   --output output/generated_records.json \
//!   --count 500 --seed 7 --timestamp-order array
//!
//! # Show the schema after annotation
//! session-synth annotate --schema schemas/schema.json
//!
//! # Check a previously written output file
//! session-synth verify --input output/generated_records.json
//! ```

pub mod args;
pub mod commands;
pub mod config;
pub mod output;

pub use args::{AnnotateArgs, GenerateArgs, InputArgs, TimestampOrder, VerifyArgs};
pub use config::{load_inputs, load_vocabulary, ConfigLoadError, Inputs};
pub use output::{read_records, write_records, SerializationError, WriteMetrics};
