//! Post-hoc checks on finished records.

use serde_json::{Map, Value};
use std::fmt;
use synth_core::time::instant_of;
use synth_core::visit::{walk_mut, ValueVisitor};
use synth_core::{
    Interval, Vocabulary, LOCATION_FIELD, SESSION_END_FIELD, SESSION_START_FIELD, TIMESTAMP_FIELD,
};

use crate::passes::timestamp::count_timestamp_fields;

/// A broken invariant found in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The record has `time_stamp` fields but no readable `start_time`/`end_time`
    MissingInterval,
    /// `end_time` is before `start_time`
    ReversedInterval { start: String, end: String },
    /// A `time_stamp` is unreadable or outside `[start_time, end_time]`
    TimestampOutOfRange { pointer: String, value: Value },
    /// A location field holds something other than a vocabulary label
    UnknownLocation { pointer: String, value: Value },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingInterval => {
                write!(f, "record has time_stamp fields but no start_time/end_time")
            }
            Violation::ReversedInterval { start, end } => {
                write!(f, "end_time {end} is before start_time {start}")
            }
            Violation::TimestampOutOfRange { pointer, value } => {
                write!(f, "time_stamp at '{pointer}' is outside the session: {value}")
            }
            Violation::UnknownLocation { pointer, value } => {
                write!(f, "location at '{pointer}' is not in the vocabulary: {value}")
            }
        }
    }
}

/// Check `record` against the temporal and location invariants.
///
/// An empty result means the record is consistent.
pub fn verify_record(record: &Value, vocabulary: &Vocabulary) -> Vec<Violation> {
    let mut violations = Vec::new();

    let start = record.get(SESSION_START_FIELD);
    let end = record.get(SESSION_END_FIELD);
    let interval = match (start.and_then(instant_of), end.and_then(instant_of)) {
        (Some(s), Some(e)) => {
            let interval = Interval::new(s, e);
            if interval.is_none() {
                violations.push(Violation::ReversedInterval {
                    start: value_text(start),
                    end: value_text(end),
                });
            }
            interval
        }
        _ => {
            if count_timestamp_fields(record) > 0 {
                violations.push(Violation::MissingInterval);
            }
            None
        }
    };

    // walk_mut needs a mutable tree; the checker never writes to it
    let mut scratch = record.clone();
    let mut checker = Checker {
        interval,
        vocabulary,
        violations,
    };
    walk_mut(&mut scratch, &mut checker);
    checker.violations
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

struct Checker<'a> {
    interval: Option<Interval>,
    vocabulary: &'a Vocabulary,
    violations: Vec<Violation>,
}

impl ValueVisitor for Checker<'_> {
    fn visit_object(&mut self, pointer: &str, object: &mut Map<String, Value>) {
        for (key, value) in object.iter() {
            if key.to_lowercase() == LOCATION_FIELD {
                let known = value
                    .as_str()
                    .is_some_and(|label| self.vocabulary.contains(label));
                if !known {
                    self.violations.push(Violation::UnknownLocation {
                        pointer: format!("{pointer}/{key}"),
                        value: value.clone(),
                    });
                }
            }
        }

        // Without an interval the record-level violation already covers this
        let Some(interval) = self.interval else {
            return;
        };
        if let Some(value) = object.get(TIMESTAMP_FIELD) {
            let inside = instant_of(value).is_some_and(|instant| interval.contains(&instant));
            if !inside {
                self.violations.push(Violation::TimestampOutOfRange {
                    pointer: format!("{pointer}/{TIMESTAMP_FIELD}"),
                    value: value.clone(),
                });
            }
        }
    }
}
