//! Per-record temporal state.

use crate::generator::GeneratorError;
use chrono::{DateTime, Utc};
use synth_core::schema::{SESSION_END_FIELD, SESSION_START_FIELD};
use synth_core::{GeneratorTag, Interval};

/// The `[start, end]` instants of the record currently being generated.
///
/// A context lives for exactly one record: the batch driver builds a fresh
/// one per record and passes it by `&mut` through generation. The
/// session-start generator fills `start`, the session-end generator fills
/// `end`, and plain timestamps read both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemporalContext {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TemporalContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Both bounds, once set.
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start?, self.end?)
    }

    pub(crate) fn set_start(&mut self, start: DateTime<Utc>) {
        self.start = Some(start);
    }

    pub(crate) fn set_end(&mut self, end: DateTime<Utc>) {
        self.end = Some(end);
    }

    /// The start instant, or an ordering violation on behalf of `tag`.
    pub fn require_start(&self, tag: GeneratorTag) -> Result<DateTime<Utc>, GeneratorError> {
        self.start.ok_or(GeneratorError::OrderingViolation {
            tag,
            missing: SESSION_START_FIELD,
        })
    }

    /// Both bounds, or an ordering violation naming the first missing one.
    pub fn require_interval(&self, tag: GeneratorTag) -> Result<Interval, GeneratorError> {
        let start = self.require_start(tag)?;
        let end = self.end.ok_or(GeneratorError::OrderingViolation {
            tag,
            missing: SESSION_END_FIELD,
        })?;
        Interval::new(start, end).ok_or(GeneratorError::OrderingViolation {
            tag,
            missing: SESSION_END_FIELD,
        })
    }
}
