//! Selection from listed values (`enum`).

use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;

/// Pick one of `values` uniformly; an empty list yields null.
pub fn generate_one_of<R: Rng>(rng: &mut R, values: &[Value]) -> Value {
    values.choose(rng).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_empty_pool_is_null() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_one_of(&mut rng, &[]), Value::Null);
    }

    #[test]
    fn test_picks_every_value_eventually() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = vec![json!("a"), json!(1), json!({ "nested": true })];

        let mut seen = vec![false; pool.len()];
        for _ in 0..200 {
            let value = generate_one_of(&mut rng, &pool);
            let idx = pool.iter().position(|v| *v == value).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
