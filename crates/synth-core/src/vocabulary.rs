//! Reference vocabulary for location fields.
//!
//! The vocabulary file is a list of entries with at least a `name`, either
//! wrapped as `{"locations": [...]}` or given as a bare array. Only the names
//! are kept; they are immutable once loaded.

use crate::document::{parse_document, DocumentError, DocumentFormat};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for vocabulary loading.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// Error reading vocabulary file
    #[error("Failed to read vocabulary file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error decoding the vocabulary document
    #[error("Failed to parse vocabulary: {0}")]
    ParseError(#[from] DocumentError),

    /// No labels to draw from
    #[error("Vocabulary contains no entries")]
    Empty,
}

/// One entry of the vocabulary file. Fields other than `name` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VocabularyDocument {
    Wrapped { locations: Vec<LocationEntry> },
    Bare(Vec<LocationEntry>),
}

/// Ordered, non-empty list of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    labels: Vec<String>,
}

impl Vocabulary {
    /// Create a vocabulary from labels.
    pub fn new<I, S>(labels: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(VocabularyError::Empty);
        }
        Ok(Self { labels })
    }

    /// Load a vocabulary from a JSON or YAML file (chosen by extension).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let format = DocumentFormat::from_path(&path);
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse a vocabulary from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        Self::parse(json, DocumentFormat::Json)
    }

    fn parse(content: &str, format: DocumentFormat) -> Result<Self, VocabularyError> {
        let entries = match parse_document(content, format)? {
            VocabularyDocument::Wrapped { locations } => locations,
            VocabularyDocument::Bare(entries) => entries,
        };
        Self::new(entries.into_iter().map(|entry| entry.name))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Pick a label uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Non-empty by construction
        self.labels
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
