//! Location substitution pass.

use rand::Rng;
use serde_json::Value;
use synth_core::visit::for_each_object_mut;
use synth_core::{Vocabulary, LOCATION_FIELD};

/// Overwrite every field named "location" (any case) with a vocabulary label.
///
/// Whatever the field held before is discarded, whatever its type. Returns the
/// number of fields replaced.
pub fn substitute_locations<R: Rng>(
    record: &mut Value,
    vocabulary: &Vocabulary,
    rng: &mut R,
) -> usize {
    let mut replaced = 0;

    for_each_object_mut(record, |_, object| {
        for (key, value) in object.iter_mut() {
            if key.to_lowercase() == LOCATION_FIELD {
                *value = Value::String(vocabulary.choose(rng).to_string());
                replaced += 1;
            }
        }
    });

    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(["Paris", "Tokyo"]).unwrap()
    }

    #[test]
    fn test_replaces_nested_locations() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = json!({
            "location": "nowhere",
            "activities": [
                { "LOCATION": 17, "note": "x" },
                { "Location": { "lat": 1.0 } },
                { "nested": [{ "location": null }] }
            ]
        });

        let replaced = substitute_locations(&mut record, &vocabulary(), &mut rng);
        assert_eq!(replaced, 4);

        let labels = [
            &record["location"],
            &record["activities"][0]["LOCATION"],
            &record["activities"][1]["Location"],
            &record["activities"][2]["nested"][0]["location"],
        ];
        for label in labels {
            let label = label.as_str().unwrap();
            assert!(vocabulary().contains(label));
        }
        assert_eq!(record["activities"][0]["note"], "x");
    }

    #[test]
    fn test_no_location_fields_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = json!({ "locations": ["a"], "place": "b", "n": [1, 2] });
        let before = record.clone();

        assert_eq!(substitute_locations(&mut record, &vocabulary(), &mut rng), 0);
        assert_eq!(record, before);
    }

    #[test]
    fn test_scalar_record() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = json!("location");
        assert_eq!(substitute_locations(&mut record, &vocabulary(), &mut rng), 0);
    }
}
