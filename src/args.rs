//! CLI argument definitions for session-synth.

use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use synth_generator::TimestampOrdering;

/// Input files shared by commands that generate or check records.
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Path to the record schema (JSON, or YAML by extension)
    #[arg(
        long,
        short = 's',
        default_value = "schemas/schema.json",
        env = "SESSION_SYNTH_SCHEMA"
    )]
    pub schema: PathBuf,

    /// Path to the location vocabulary
    #[arg(
        long,
        short = 'l',
        default_value = "data/locations.json",
        env = "SESSION_SYNTH_LOCATIONS"
    )]
    pub locations: PathBuf,
}

/// How `time_stamp` fields relate to their position in arrays.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimestampOrder {
    /// Keep array elements where they were generated
    #[default]
    Traversal,
    /// Sort arrays of timestamped objects by time
    Array,
}

impl From<TimestampOrder> for TimestampOrdering {
    fn from(order: TimestampOrder) -> Self {
        match order {
            TimestampOrder::Traversal => TimestampOrdering::Traversal,
            TimestampOrder::Array => TimestampOrdering::ArrayPosition,
        }
    }
}

/// Arguments for `generate`.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output file for the JSON array of records
    #[arg(
        long,
        short = 'o',
        default_value = "output/generated_records.json",
        env = "SESSION_SYNTH_OUTPUT"
    )]
    pub output: PathBuf,

    /// Number of records to generate
    #[arg(long, short = 'n', default_value = "10", env = "SESSION_SYNTH_COUNT")]
    pub count: u64,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, default_value = "42", env = "SESSION_SYNTH_SEED")]
    pub seed: u64,

    /// Stop at the first record that fails instead of skipping it
    #[arg(long, env = "SESSION_SYNTH_FAIL_FAST")]
    pub fail_fast: bool,

    /// Whether arrays are reordered by time_stamp
    #[arg(
        long,
        value_enum,
        default_value_t = TimestampOrder::Traversal,
        env = "SESSION_SYNTH_TIMESTAMP_ORDER"
    )]
    pub timestamp_order: TimestampOrder,

    /// Reference instant sessions count back from (default: current time)
    #[arg(long, value_parser = parse_now, env = "SESSION_SYNTH_NOW")]
    pub now: Option<DateTime<Utc>>,
}

/// Arguments for `annotate`.
#[derive(Args, Clone, Debug)]
pub struct AnnotateArgs {
    /// Path to the record schema (JSON, or YAML by extension)
    #[arg(
        long,
        short = 's',
        default_value = "schemas/schema.json",
        env = "SESSION_SYNTH_SCHEMA"
    )]
    pub schema: PathBuf,
}

/// Arguments for `verify`.
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    /// Output file written by `generate`
    #[arg(
        long,
        short = 'i',
        default_value = "output/generated_records.json",
        env = "SESSION_SYNTH_INPUT"
    )]
    pub input: PathBuf,

    /// Path to the location vocabulary
    #[arg(
        long,
        short = 'l',
        default_value = "data/locations.json",
        env = "SESSION_SYNTH_LOCATIONS"
    )]
    pub locations: PathBuf,
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    synth_core::parse_instant(s).ok_or_else(|| format!("invalid instant: {s}"))
}
