//! Batch driver producing finished records.
//!
//! Each record gets its own RNG, seeded from the batch seed and the record
//! index, and its own [`TemporalContext`]. A record is generated, passed
//! through location substitution and timestamp normalization, and appended
//! before the next one starts.

use crate::context::TemporalContext;
use crate::generator::{GeneratorError, SampleGenerator};
use crate::passes::location::substitute_locations;
use crate::passes::timestamp::{normalize_timestamps, TimestampOrdering};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use synth_core::Interval;
use tracing::{debug, info, warn};

/// Upper bound on records reserved up front; larger batches grow as they go.
const MAX_PREALLOCATED_RECORDS: u64 = 1024;

/// What to do when one record fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure against its index and keep going
    #[default]
    RecordAndContinue,
    /// Stop the batch at the first failure
    FailFast,
}

/// Options for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub failure_policy: FailurePolicy,
    pub timestamp_ordering: TimestampOrdering,
}

/// Error type for batch runs.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// A record failed under [`FailurePolicy::FailFast`]
    #[error("record {index} failed: {source}")]
    RecordFailed {
        index: u64,
        #[source]
        source: GeneratorError,
    },
}

/// A record that could not be generated.
#[derive(Debug)]
pub struct RecordFailure {
    pub index: u64,
    pub error: GeneratorError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of records asked for
    pub requested: u64,
    /// Finished records, in index order
    pub records: Vec<Value>,
    /// Records skipped under [`FailurePolicy::RecordAndContinue`]
    pub failures: Vec<RecordFailure>,
}

impl BatchReport {
    /// Whether every requested record was produced.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.records.len() as u64 == self.requested
    }
}

/// Drives record generation over a sequence of indices.
pub struct BatchDriver {
    generator: SampleGenerator,
    seed: u64,
    /// Index of the next record
    index: u64,
    options: BatchOptions,
}

impl BatchDriver {
    /// Create a driver with the given generator and seed.
    pub fn new(generator: SampleGenerator, seed: u64) -> Self {
        Self {
            generator,
            seed,
            index: 0,
            options: BatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the index of the next record.
    ///
    /// Records depend only on the seed and their index, so starting at `index`
    /// produces the same records a full run would produce from that point.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// Get the index of the next record.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Compute the RNG seed for a specific index.
    fn record_seed(&self, index: u64) -> u64 {
        self.seed
            .wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15))
    }

    /// Generate the record at `index` without moving the driver.
    pub fn generate_at(&self, index: u64) -> Result<Value, GeneratorError> {
        let mut rng = StdRng::seed_from_u64(self.record_seed(index));
        let mut temporal = TemporalContext::new();

        let mut record = self.generator.generate(&mut rng, &mut temporal)?;
        let interval = Interval::from_record(&record).or_else(|| temporal.interval());

        let locations = substitute_locations(&mut record, self.generator.vocabulary(), &mut rng);
        let normalization = normalize_timestamps(
            &mut record,
            interval,
            self.options.timestamp_ordering,
            &mut rng,
        )?;

        debug!(
            index,
            locations,
            timestamps = normalization.instants.len(),
            repaired = normalization.repaired,
            "record finalized"
        );

        Ok(record)
    }

    /// Generate the next record.
    pub fn next_record(&mut self) -> Result<Value, GeneratorError> {
        let index = self.index;
        self.index += 1;
        self.generate_at(index)
    }

    /// Generate `count` records.
    pub fn run(&mut self, count: u64) -> Result<BatchReport, BatchError> {
        info!(
            "Generating {} records starting at index {}",
            count, self.index
        );

        let mut report = BatchReport {
            requested: count,
            records: Vec::with_capacity(count.min(MAX_PREALLOCATED_RECORDS) as usize),
            failures: Vec::new(),
        };

        for _ in 0..count {
            let index = self.index;
            match self.next_record() {
                Ok(record) => report.records.push(record),
                Err(error) => match self.options.failure_policy {
                    FailurePolicy::FailFast => {
                        return Err(BatchError::RecordFailed {
                            index,
                            source: error,
                        })
                    }
                    FailurePolicy::RecordAndContinue => {
                        warn!(index, %error, "record skipped");
                        report.failures.push(RecordFailure { index, error });
                    }
                },
            }
        }

        info!(
            "Batch complete: {} records, {} failures",
            report.records.len(),
            report.failures.len()
        );

        Ok(report)
    }

    /// Lazily generate `count` records.
    pub fn records(&mut self, count: u64) -> RecordIterator<'_> {
        RecordIterator {
            driver: self,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates records.
pub struct RecordIterator<'a> {
    driver: &'a mut BatchDriver,
    remaining: u64,
}

impl Iterator for RecordIterator<'_> {
    type Item = Result<Value, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.driver.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RecordIterator<'_> {}
