//! UUID value generator.

use rand::Rng;
use uuid::{Builder, Uuid};

/// Random v4 UUID drawn from the record RNG, so it follows the seed.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.random()).into_uuid()
}
