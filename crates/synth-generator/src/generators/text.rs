//! String value generators.
//!
//! Known formats produce values of that shape:
//! - `date-time` - instant within the year before the reference instant
//! - `date` - the date part of such an instant
//! - `email`, `uri` / `url`, `hostname`, `ipv4`
//! - `uuid` - random UUID v4
//!
//! Any other string is lorem-ipsum words cut to the node's length bounds.

use super::timestamp::generate_date_time;
use super::uuid::generate_uuid_v4;
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;
use synth_core::{format_instant, SchemaNode};

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip",
    "commodo",
];

/// Word count for strings without length bounds.
const DEFAULT_WORDS: std::ops::RangeInclusive<usize> = 1..=4;

/// Generate a string for `node`.
pub fn generate_string<R: Rng>(node: &SchemaNode, rng: &mut R, now: DateTime<Utc>) -> Value {
    let text = match node.format.as_deref() {
        Some("date-time") => format_instant(&generate_date_time(rng, now)),
        Some("date") => generate_date_time(rng, now).format("%Y-%m-%d").to_string(),
        Some("email") => format!(
            "{}.{}{}@example.com",
            word(rng),
            word(rng),
            generate_random_digits(rng, 2)
        ),
        Some("uri") | Some("url") => format!("https://example.com/{}/{}", word(rng), word(rng)),
        Some("hostname") => format!("{}.example.com", word(rng)),
        Some("ipv4") => format!(
            "{}.{}.{}.{}",
            rng.random_range(1..=254),
            rng.random_range(0..=255),
            rng.random_range(0..=255),
            rng.random_range(1..=254)
        ),
        Some("uuid") => generate_uuid_v4(rng).to_string(),
        _ => generate_lorem(rng, node.min_length, node.max_length),
    };

    Value::String(text)
}

/// Lorem-ipsum text, exactly within `[min_length, max_length]` when given.
pub fn generate_lorem<R: Rng>(
    rng: &mut R,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> String {
    if min_length.is_none() && max_length.is_none() {
        let count = rng.random_range(DEFAULT_WORDS);
        return (0..count).map(|_| word(rng)).collect::<Vec<_>>().join(" ");
    }

    let min = min_length.unwrap_or(1).min(max_length.unwrap_or(usize::MAX));
    let max = max_length.unwrap_or(min + 32).max(min);
    let target = rng.random_range(min..=max);

    let mut text = String::with_capacity(target + 16);
    while text.len() < target {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word(rng));
    }

    // Words are ASCII, so byte truncation is a char boundary
    text.truncate(target);
    if text.ends_with(' ') {
        text.pop();
        text.push('a');
    }
    text
}

fn word<R: Rng>(rng: &mut R) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("lorem")
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit should be 1-9 to avoid leading zeros
    result.push(char::from(b'0' + rng.random_range(1..10u8)));

    // Remaining digits can be 0-9
    for _ in 1..digits {
        result.push(char::from(b'0' + rng.random_range(0..10u8)));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use synth_core::parse_instant;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn string_for(json: &str, rng: &mut StdRng) -> String {
        let node = SchemaNode::from_json(json).unwrap();
        match generate_string(&node, rng, now()) {
            Value::String(s) => s,
            other => panic!("Expected string value, got {other:?}"),
        }
    }

    #[test]
    fn test_length_bounds_are_exact() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let s = string_for(r#"{ "type": "string", "minLength": 3, "maxLength": 8 }"#, &mut rng);
            assert!((3..=8).contains(&s.len()), "length of {s:?}");
            assert!(!s.ends_with(' '));
        }
    }

    #[test]
    fn test_zero_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let s = string_for(r#"{ "type": "string", "maxLength": 0 }"#, &mut rng);
        assert!(s.is_empty());
    }

    #[test]
    fn test_unbounded_words() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let s = string_for(r#"{ "type": "string" }"#, &mut rng);
            let count = s.split(' ').count();
            assert!(DEFAULT_WORDS.contains(&count));
            assert!(s.split(' ').all(|w| WORDS.contains(&w)));
        }
    }

    #[test]
    fn test_formats() {
        let mut rng = StdRng::seed_from_u64(42);

        let email = string_for(r#"{ "format": "email" }"#, &mut rng);
        assert!(email.ends_with("@example.com"));

        let id = string_for(r#"{ "format": "uuid" }"#, &mut rng);
        assert_eq!(id.len(), 36);
        assert!(uuid::Uuid::parse_str(&id).is_ok());

        let ip = string_for(r#"{ "format": "ipv4" }"#, &mut rng);
        assert_eq!(ip.split('.').count(), 4);
        assert!(ip.parse::<std::net::Ipv4Addr>().is_ok());

        let date = string_for(r#"{ "format": "date" }"#, &mut rng);
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());

        let uri = string_for(r#"{ "format": "uri" }"#, &mut rng);
        assert!(uri.starts_with("https://example.com/"));
    }

    #[test]
    fn test_untagged_date_time_is_recent() {
        let mut rng = StdRng::seed_from_u64(42);
        let s = string_for(r#"{ "type": "string", "format": "date-time" }"#, &mut rng);
        let instant = parse_instant(&s).unwrap();
        assert!(instant <= now());
        assert!(s.ends_with('Z'));
    }

    #[test]
    fn test_random_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        let digits = generate_random_digits(&mut rng, 6);
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        assert!(!digits.starts_with('0'));
        assert!(generate_random_digits(&mut rng, 0).is_empty());
    }
}
