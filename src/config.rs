//! Loading of the schema and vocabulary inputs.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use synth_core::{SchemaError, SchemaNode, Vocabulary, VocabularyError};
use thiserror::Error;

/// Errors that prevent a run from starting.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// Schema file missing or malformed.
    #[error("Failed to load schema from {path:?}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    /// Vocabulary file missing, malformed or empty.
    #[error("Failed to load locations from {path:?}: {source}")]
    Vocabulary {
        path: PathBuf,
        #[source]
        source: VocabularyError,
    },
}

/// Everything generation needs from disk, loaded once.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub schema: SchemaNode,
    pub vocabulary: Arc<Vocabulary>,
}

/// Load the schema and the vocabulary.
pub fn load_inputs(schema_path: &Path, locations_path: &Path) -> Result<Inputs, ConfigLoadError> {
    let schema = load_schema(schema_path)?;
    let vocabulary = load_vocabulary(locations_path)?;

    tracing::info!(
        "Loaded schema from {:?} ({} top-level properties) and {} locations from {:?}",
        schema_path,
        schema.properties.len(),
        vocabulary.len(),
        locations_path
    );

    Ok(Inputs {
        schema,
        vocabulary: Arc::new(vocabulary),
    })
}

pub fn load_schema(path: &Path) -> Result<SchemaNode, ConfigLoadError> {
    SchemaNode::from_file(path).map_err(|source| ConfigLoadError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_vocabulary(path: &Path) -> Result<Vocabulary, ConfigLoadError> {
    Vocabulary::from_file(path).map_err(|source| ConfigLoadError::Vocabulary {
        path: path.to_path_buf(),
        source,
    })
}
