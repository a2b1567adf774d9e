//! Timestamp value generators.
//!
//! The three temporal tags share the record's [`TemporalContext`]:
//! session start writes the start, session end reads the start and writes
//! the end, and activity times read both. A record may mention `start_time`
//! or `end_time` more than once (e.g. in nested objects); later occurrences
//! reuse the stored bound so the context is populated only once.

use crate::context::TemporalContext;
use crate::generator::GeneratorError;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;
use std::ops::{Range, RangeInclusive};
use synth_core::{GeneratorTag, Interval};

/// How far back from `now` a session may start, in days.
pub const SESSION_START_DAYS_AGO: RangeInclusive<i64> = 1..=365;

/// Session length in minutes.
pub const SESSION_LENGTH_MINUTES: Range<i64> = 30..210;

/// Window for untagged `date-time` strings, in days before `now`.
pub const UNTAGGED_WINDOW_DAYS: i64 = 365;

/// Generate (or reuse) the record's start instant.
pub fn generate_session_start<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    context: &mut TemporalContext,
) -> DateTime<Utc> {
    if let Some(start) = context.start() {
        return start;
    }

    let days = rng.random_range(SESSION_START_DAYS_AGO);
    let start = (now - Duration::days(days)).trunc_subsecs(3);
    context.set_start(start);
    start
}

/// Generate (or reuse) the record's end instant.
pub fn generate_session_end<R: Rng>(
    rng: &mut R,
    context: &mut TemporalContext,
) -> Result<DateTime<Utc>, GeneratorError> {
    let start = context.require_start(GeneratorTag::SessionEnd)?;
    if let Some(end) = context.end() {
        return Ok(end);
    }

    let minutes = rng.random_range(SESSION_LENGTH_MINUTES);
    let end = start + Duration::minutes(minutes);
    context.set_end(end);
    Ok(end)
}

/// Generate an instant inside the record's interval.
pub fn generate_activity_time<R: Rng>(
    rng: &mut R,
    context: &TemporalContext,
) -> Result<DateTime<Utc>, GeneratorError> {
    let interval = context.require_interval(GeneratorTag::PlainTimestamp)?;
    Ok(interval.sample(rng))
}

/// Generate an unconstrained instant within the year before `now`.
pub fn generate_date_time<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    match Interval::new(now - Duration::days(UNTAGGED_WINDOW_DAYS), now) {
        Some(window) => window.sample(rng),
        None => now,
    }
}
