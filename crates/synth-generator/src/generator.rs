//! Sample generation for one record.

use crate::annotate::annotate;
use crate::context::TemporalContext;
use crate::generators::{generate_value, GenerationScope};
use chrono::{DateTime, SubsecRound, Utc};
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;
use synth_core::{GeneratorTag, SchemaNode, Vocabulary};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A dependent temporal field was reached before the bound it needs
    #[error("{tag} generated before {missing} in the current record")]
    OrderingViolation {
        tag: GeneratorTag,
        missing: &'static str,
    },

    /// Record has `time_stamp` fields but no usable start/end interval
    #[error("record has time_stamp fields but no start_time/end_time interval")]
    MissingInterval,

    /// `$ref` nesting deeper than the generator follows
    #[error("schema nesting exceeds {0} levels")]
    DepthExceeded(usize),

    /// Schema error
    #[error("Schema error: {0}")]
    SchemaError(#[from] synth_core::SchemaError),
}

/// Produces one schema-conforming sample per call.
///
/// The generator owns the annotated schema and shares the vocabulary. It
/// keeps no per-record state: callers pass the record's RNG and
/// [`TemporalContext`] explicitly.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    /// Annotated schema
    schema: SchemaNode,
    /// Labels for location fields
    vocabulary: Arc<Vocabulary>,
    /// Reference instant session starts count back from
    now: DateTime<Utc>,
}

impl SampleGenerator {
    /// Annotate `schema` and build a generator around it.
    pub fn new(schema: &SchemaNode, vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            schema: annotate(schema),
            vocabulary,
            now: Utc::now().trunc_subsecs(3),
        }
    }

    /// Fix the reference instant (defaults to the construction time).
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now.trunc_subsecs(3);
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Generate one sample over the full schema.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        temporal: &mut TemporalContext,
    ) -> Result<Value, GeneratorError> {
        let mut scope = GenerationScope::new(&self.schema, &self.vocabulary, self.now, rng, temporal);
        generate_value(&self.schema, &mut scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use synth_core::{parse_instant, Interval};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn vocabulary() -> Arc<Vocabulary> {
        Arc::new(Vocabulary::new(["Paris", "Tokyo"]).unwrap())
    }

    fn session_schema() -> SchemaNode {
        SchemaNode::from_json(
            r#"{
                "type": "object",
                "properties": {
                    "id": { "type": "string", "format": "uuid" },
                    "start_time": { "type": "string", "format": "date-time" },
                    "end_time": { "type": "string", "format": "date-time" },
                    "activities": {
                        "type": "array",
                        "minItems": 3,
                        "maxItems": 6,
                        "items": {
                            "type": "object",
                            "properties": {
                                "time_stamp": { "type": "string", "format": "date-time" },
                                "location": { "type": "string" }
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn instant(value: &Value, key: &str) -> DateTime<Utc> {
        parse_instant(value[key].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_generate_fills_context_and_record() {
        let generator = SampleGenerator::new(&session_schema(), vocabulary()).with_now(now());
        let mut rng = StdRng::seed_from_u64(42);
        let mut temporal = TemporalContext::new();

        let sample = generator.generate(&mut rng, &mut temporal).unwrap();

        let start = instant(&sample, "start_time");
        let end = instant(&sample, "end_time");
        assert_eq!(temporal.start(), Some(start));
        assert_eq!(temporal.end(), Some(end));

        let interval = Interval::new(start, end).unwrap();
        let activities = sample["activities"].as_array().unwrap();
        assert!((3..=6).contains(&activities.len()));
        for activity in activities {
            assert!(interval.contains(&instant(activity, "time_stamp")));
            let location = activity["location"].as_str().unwrap();
            assert!(generator.vocabulary().contains(location));
        }
    }

    #[test]
    fn test_record_keys_follow_schema_order() {
        let generator = SampleGenerator::new(&session_schema(), vocabulary()).with_now(now());
        let mut rng = StdRng::seed_from_u64(7);
        let sample = generator
            .generate(&mut rng, &mut TemporalContext::new())
            .unwrap();

        let keys: Vec<&str> = sample
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["id", "start_time", "end_time", "activities"]);
    }

    #[test]
    fn test_dependent_field_before_start_is_an_ordering_violation() {
        let schema = SchemaNode::from_json(
            r#"{
                "type": "object",
                "properties": {
                    "seen": { "type": "string", "format": "date-time" },
                    "start_time": { "type": "string" },
                    "end_time": { "type": "string" }
                }
            }"#,
        )
        .unwrap();
        let generator = SampleGenerator::new(&schema, vocabulary()).with_now(now());
        let mut rng = StdRng::seed_from_u64(42);

        let result = generator.generate(&mut rng, &mut TemporalContext::new());
        assert!(matches!(
            result,
            Err(GeneratorError::OrderingViolation {
                tag: GeneratorTag::PlainTimestamp,
                missing: "start_time"
            })
        ));
    }

    #[test]
    fn test_end_before_start_is_an_ordering_violation() {
        let schema = SchemaNode::from_json(
            r#"{ "properties": { "end_time": {}, "start_time": {} } }"#,
        )
        .unwrap();
        let generator = SampleGenerator::new(&schema, vocabulary()).with_now(now());
        let mut rng = StdRng::seed_from_u64(42);

        let result = generator.generate(&mut rng, &mut TemporalContext::new());
        assert!(matches!(
            result,
            Err(GeneratorError::OrderingViolation {
                tag: GeneratorTag::SessionEnd,
                ..
            })
        ));
    }

    #[test]
    fn test_deterministic_generation() {
        let generator = SampleGenerator::new(&session_schema(), vocabulary()).with_now(now());

        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        let sample1 = generator
            .generate(&mut rng1, &mut TemporalContext::new())
            .unwrap();
        let sample2 = generator
            .generate(&mut rng2, &mut TemporalContext::new())
            .unwrap();

        assert_eq!(sample1, sample2);
    }

    #[test]
    fn test_now_is_truncated_to_millis() {
        let precise = now() + chrono::Duration::nanoseconds(1_234_567);
        let generator = SampleGenerator::new(&session_schema(), vocabulary()).with_now(precise);
        assert_eq!(
            generator.now(),
            now() + chrono::Duration::milliseconds(1)
        );
    }
}
