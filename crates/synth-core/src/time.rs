//! Instants and record intervals.
//!
//! Instants are written as RFC 3339 UTC with millisecond precision
//! (`2024-03-01T10:15:30.123Z`). Generated instants sit on the millisecond
//! grid. Instants read from input may be finer; those keep their full
//! precision when written back, so a value survives a write/parse cycle
//! unchanged either way.

use crate::schema::{SESSION_END_FIELD, SESSION_START_FIELD};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde_json::Value;

/// Render an instant in the record text form.
///
/// Sub-millisecond digits are written out when present.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    let format = if instant.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    instant.to_rfc3339_opts(format, true)
}

/// Parse an instant in various formats.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Parse an instant held in a JSON value, if it is a string in a known format.
pub fn instant_of(value: &Value) -> Option<DateTime<Utc>> {
    value.as_str().and_then(parse_instant)
}

/// Closed interval `[start, end]` bounding one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Create an interval; `None` when `end` precedes `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Read the interval from a record's own top-level `start_time` / `end_time`.
    pub fn from_record(record: &Value) -> Option<Self> {
        let start = record.get(SESSION_START_FIELD).and_then(instant_of)?;
        let end = record.get(SESSION_END_FIELD).and_then(instant_of)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// Draw a uniformly random instant inside the interval.
    ///
    /// Draws are on the millisecond grid, clamped to the bounds, so an
    /// interval with sub-millisecond bounds may yield one of its bounds.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> DateTime<Utc> {
        let start_ms = self.start.timestamp_millis();
        let end_ms = self.end.timestamp_millis();

        if start_ms >= end_ms {
            return self.start;
        }

        let random_ms = rng.random_range(start_ms..=end_ms);
        DateTime::from_timestamp_millis(random_ms)
            .unwrap_or(self.start)
            .clamp(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_format_instant_uses_millis_and_z() {
        let instant = at(10, 15) + Duration::milliseconds(123);
        assert_eq!(format_instant(&instant), "2024-03-01T10:15:00.123Z");
        assert_eq!(parse_instant(&format_instant(&instant)), Some(instant));
    }

    #[test]
    fn test_format_instant_keeps_sub_millisecond_digits() {
        let instant = parse_instant("2024-03-01T10:00:00.0007Z").unwrap();
        assert_eq!(format_instant(&instant), "2024-03-01T10:00:00.000700Z");
        assert_eq!(parse_instant(&format_instant(&instant)), Some(instant));
    }

    #[test]
    fn test_sample_with_sub_millisecond_bounds() {
        let start = parse_instant("2024-03-01T10:00:00.0007Z").unwrap();
        let end = parse_instant("2024-03-01T10:00:00.0009Z").unwrap();
        let interval = Interval::new(start, end).unwrap();

        let wide_end = parse_instant("2024-03-01T10:00:00.0059Z").unwrap();
        let wide = Interval::new(start, wide_end).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            assert!(interval.contains(&interval.sample(&mut rng)));
            assert!(wide.contains(&wide.sample(&mut rng)));
        }
    }

    #[test]
    fn test_parse_instant_formats() {
        let offset = parse_instant("2024-03-01T12:15:00+02:00").unwrap();
        assert_eq!(offset, at(10, 15));

        let date_only = parse_instant("2020-01-01").unwrap();
        assert_eq!(date_only.year(), 2020);

        assert_eq!(parse_instant("yesterday"), None);
    }

    #[test]
    fn test_interval_rejects_reversed_bounds() {
        assert!(Interval::new(at(11, 0), at(10, 0)).is_none());
        assert!(Interval::new(at(10, 0), at(10, 0)).is_some());
    }

    #[test]
    fn test_interval_contains_is_inclusive() {
        let interval = Interval::new(at(10, 0), at(11, 0)).unwrap();
        assert!(interval.contains(&at(10, 0)));
        assert!(interval.contains(&at(11, 0)));
        assert!(interval.contains(&at(10, 30)));
        assert!(!interval.contains(&at(11, 1)));
        assert!(!interval.contains(&at(9, 59)));
    }

    #[test]
    fn test_interval_sample_stays_inside() {
        let interval = Interval::new(at(10, 0), at(10, 45)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert!(interval.contains(&interval.sample(&mut rng)));
        }

        let point = Interval::new(at(10, 0), at(10, 0)).unwrap();
        assert_eq!(point.sample(&mut rng), at(10, 0));
    }

    #[test]
    fn test_interval_from_record() {
        let record = json!({
            "start_time": "2024-03-01T10:00:00.000Z",
            "end_time": "2024-03-01T11:00:00.000Z",
        });
        let interval = Interval::from_record(&record).unwrap();
        assert_eq!(interval.start(), at(10, 0));
        assert_eq!(interval.end(), at(11, 0));

        assert!(Interval::from_record(&json!({ "start_time": "2024-03-01" })).is_none());
        assert!(Interval::from_record(&json!([1, 2])).is_none());
    }
}
