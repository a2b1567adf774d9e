//! Timestamp normalization pass.
//!
//! Every object carrying a `time_stamp` field is checked against the
//! record's `[start, end]` interval:
//!
//! 1. Collection and repair, in document order. A value that parses and lies
//!    inside the interval (both ends inclusive) is kept; anything else is
//!    replaced by a fresh uniform instant inside the interval.
//! 2. Reordering. The collected entries are sorted by instant and each one is
//!    written back to its own object in the record text form.
//!
//! Write-back goes to the object each entry came from, so step 2 only
//! canonicalizes the text. Objects are not moved inside their arrays unless
//! [`TimestampOrdering::ArrayPosition`] is requested.

use crate::generator::GeneratorError;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::{Map, Value};
use synth_core::time::instant_of;
use synth_core::visit::{walk_mut, ValueVisitor};
use synth_core::{format_instant, Interval, TIMESTAMP_FIELD};

/// How normalized timestamps relate to container order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampOrdering {
    /// Keep objects where they are; only values are repaired
    #[default]
    Traversal,
    /// Also stable-sort arrays of timestamped objects by `time_stamp`
    ArrayPosition,
}

/// Result of one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalization {
    /// All `time_stamp` instants, ascending
    pub instants: Vec<DateTime<Utc>>,
    /// How many values were out of range or unreadable and re-drawn
    pub repaired: usize,
}

/// One `time_stamp` found in the record.
struct TimestampEntry {
    /// JSON pointer of the owning object
    pointer: String,
    instant: DateTime<Utc>,
}

/// Repair and canonicalize every `time_stamp` in `record`.
///
/// `interval` is normally read from the record itself with
/// [`Interval::from_record`]. A record with `time_stamp` fields but no
/// interval fails with [`GeneratorError::MissingInterval`].
pub fn normalize_timestamps<R: Rng>(
    record: &mut Value,
    interval: Option<Interval>,
    ordering: TimestampOrdering,
    rng: &mut R,
) -> Result<Normalization, GeneratorError> {
    let Some(interval) = interval else {
        return if count_timestamp_fields(record) == 0 {
            Ok(Normalization::default())
        } else {
            Err(GeneratorError::MissingInterval)
        };
    };

    let mut collector = Collector {
        interval,
        rng,
        entries: Vec::new(),
        repaired: 0,
    };
    walk_mut(record, &mut collector);
    let Collector {
        mut entries,
        repaired,
        ..
    } = collector;

    entries.sort_by_key(|entry| entry.instant);
    for entry in &entries {
        if let Some(object) = record
            .pointer_mut(&entry.pointer)
            .and_then(Value::as_object_mut)
        {
            object.insert(
                TIMESTAMP_FIELD.to_string(),
                Value::String(format_instant(&entry.instant)),
            );
        }
    }

    if ordering == TimestampOrdering::ArrayPosition {
        walk_mut(record, &mut ArraySorter);
    }

    Ok(Normalization {
        instants: entries.into_iter().map(|entry| entry.instant).collect(),
        repaired,
    })
}

/// Number of objects in `record` that carry a `time_stamp` field.
pub fn count_timestamp_fields(record: &Value) -> usize {
    match record {
        Value::Object(object) => {
            usize::from(object.contains_key(TIMESTAMP_FIELD))
                + object.values().map(count_timestamp_fields).sum::<usize>()
        }
        Value::Array(items) => items.iter().map(count_timestamp_fields).sum(),
        _ => 0,
    }
}

struct Collector<'a, R: Rng> {
    interval: Interval,
    rng: &'a mut R,
    entries: Vec<TimestampEntry>,
    repaired: usize,
}

impl<R: Rng> ValueVisitor for Collector<'_, R> {
    fn visit_object(&mut self, pointer: &str, object: &mut Map<String, Value>) {
        let Some(value) = object.get_mut(TIMESTAMP_FIELD) else {
            return;
        };

        let instant = match instant_of(value) {
            Some(instant) if self.interval.contains(&instant) => instant,
            _ => {
                let fresh = self.interval.sample(self.rng);
                *value = Value::String(format_instant(&fresh));
                self.repaired += 1;
                fresh
            }
        };

        self.entries.push(TimestampEntry {
            pointer: pointer.to_string(),
            instant,
        });
    }
}

/// Sorts arrays whose elements are all objects with a readable `time_stamp`.
struct ArraySorter;

impl ValueVisitor for ArraySorter {
    fn visit_array(&mut self, _pointer: &str, array: &mut Vec<Value>) {
        let stamped = !array.is_empty()
            && array
                .iter()
                .all(|item| item.get(TIMESTAMP_FIELD).and_then(instant_of).is_some());

        if stamped {
            array.sort_by_cached_key(|item| item.get(TIMESTAMP_FIELD).and_then(instant_of));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn interval() -> Interval {
        Interval::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn record() -> Value {
        json!({
            "start_time": "2024-03-01T10:00:00.000Z",
            "end_time": "2024-03-01T11:00:00.000Z",
            "activities": [
                { "time_stamp": "2024-03-01T10:50:00.000Z", "n": 0 },
                { "time_stamp": "2023-01-01T00:00:00.000Z", "n": 1 },
                { "time_stamp": "2024-03-01T10:10:00+00:00", "n": 2 },
                { "time_stamp": "not a time", "n": 3 }
            ],
            "summary": { "time_stamp": "2024-03-01T11:00:00.000Z" }
        })
    }

    fn stamps(record: &Value) -> Vec<DateTime<Utc>> {
        record["activities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| instant_of(&a["time_stamp"]).unwrap())
            .collect()
    }

    #[test]
    fn test_out_of_range_values_are_repaired() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = record();

        let outcome =
            normalize_timestamps(&mut record, Some(interval()), TimestampOrdering::Traversal, &mut rng)
                .unwrap();

        assert_eq!(outcome.repaired, 2);
        assert_eq!(outcome.instants.len(), 5);
        assert!(outcome.instants.windows(2).all(|w| w[0] <= w[1]));
        for instant in stamps(&record) {
            assert!(interval().contains(&instant));
        }
    }

    #[test]
    fn test_in_range_values_are_kept_and_canonicalized() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = record();

        normalize_timestamps(&mut record, Some(interval()), TimestampOrdering::Traversal, &mut rng)
            .unwrap();

        assert_eq!(record["activities"][0]["time_stamp"], "2024-03-01T10:50:00.000Z");
        assert_eq!(record["activities"][2]["time_stamp"], "2024-03-01T10:10:00.000Z");
        assert_eq!(record["summary"]["time_stamp"], "2024-03-01T11:00:00.000Z");
    }

    #[test]
    fn test_traversal_ordering_keeps_positions() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = record();

        normalize_timestamps(&mut record, Some(interval()), TimestampOrdering::Traversal, &mut rng)
            .unwrap();

        let order: Vec<i64> = record["activities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["n"].as_i64().unwrap())
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_array_position_ordering_sorts_elements() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = record();

        normalize_timestamps(
            &mut record,
            Some(interval()),
            TimestampOrdering::ArrayPosition,
            &mut rng,
        )
        .unwrap();

        let instants = stamps(&record);
        assert!(instants.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(record["activities"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_second_run_is_stable() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = record();

        let first =
            normalize_timestamps(&mut record, Some(interval()), TimestampOrdering::Traversal, &mut rng)
                .unwrap();
        let after_first = record.clone();
        let second =
            normalize_timestamps(&mut record, Some(interval()), TimestampOrdering::Traversal, &mut rng)
                .unwrap();

        assert_eq!(first.instants, second.instants);
        assert_eq!(second.repaired, 0);
        assert_eq!(record, after_first);
    }

    #[test]
    fn test_sub_millisecond_bounds_stay_contained() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut record = json!({
                "start_time": "2024-03-01T10:00:00.0007Z",
                "end_time": "2024-03-01T10:00:00.0009Z",
                "events": [
                    { "time_stamp": "2024-03-01T09:00:00.000Z" },
                    { "time_stamp": "2024-03-01T10:00:00.0008Z" }
                ]
            });
            let interval = Interval::from_record(&record).unwrap();

            let outcome =
                normalize_timestamps(&mut record, Some(interval), TimestampOrdering::Traversal, &mut rng)
                    .unwrap();

            assert_eq!(outcome.repaired, 1);
            for event in record["events"].as_array().unwrap() {
                let instant = instant_of(&event["time_stamp"]).unwrap();
                assert!(interval.contains(&instant), "{}", event["time_stamp"]);
            }
            assert_eq!(record["events"][1]["time_stamp"], "2024-03-01T10:00:00.000800Z");
        }
    }

    #[test]
    fn test_missing_interval() {
        let mut rng = StdRng::seed_from_u64(42);

        let mut stamped = json!({ "e": [{ "time_stamp": "2024-03-01T10:00:00Z" }] });
        assert!(matches!(
            normalize_timestamps(&mut stamped, None, TimestampOrdering::Traversal, &mut rng),
            Err(GeneratorError::MissingInterval)
        ));

        let mut plain = json!({ "e": [1, 2, 3] });
        let outcome =
            normalize_timestamps(&mut plain, None, TimestampOrdering::Traversal, &mut rng).unwrap();
        assert_eq!(outcome, Normalization::default());
    }

    #[test]
    fn test_count_timestamp_fields() {
        assert_eq!(count_timestamp_fields(&record()), 5);
        assert_eq!(count_timestamp_fields(&json!([{ "time_stamp": null }, 1])), 1);
        assert_eq!(count_timestamp_fields(&json!("time_stamp")), 0);
    }
}
