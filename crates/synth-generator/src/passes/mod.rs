//! Post-generation passes over a finished sample.
//!
//! Both passes run once per record, after generation and before the record
//! leaves the batch driver: location substitution first, then timestamp
//! normalization.

pub mod location;
pub mod timestamp;
