//! Writing and reading record files.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from encoding or moving record files.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// Records could not be encoded as JSON.
    #[error("Failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    /// Output file or its directory could not be written.
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record file could not be read.
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record file is not a JSON array of records.
    #[error("Failed to decode records in {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Metrics from a write operation.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Number of records written.
    pub records_written: u64,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
    /// Time spent encoding and writing.
    pub write_duration: Duration,
}

/// Write `records` to `path` as one pretty-printed JSON array.
///
/// Missing parent directories are created. An existing file is replaced.
pub async fn write_records(
    path: &Path,
    records: &[Value],
) -> Result<WriteMetrics, SerializationError> {
    let started = Instant::now();
    let write_error = |source| SerializationError::Write {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_string_pretty(records).map_err(SerializationError::Encode)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(write_error)?;
    }
    tokio::fs::write(path, content.as_bytes())
        .await
        .map_err(write_error)?;

    let metrics = WriteMetrics {
        records_written: records.len() as u64,
        file_size_bytes: content.len() as u64,
        write_duration: started.elapsed(),
    };

    info!(
        "Wrote {} records ({} bytes) to {:?} in {:?}",
        metrics.records_written, metrics.file_size_bytes, path, metrics.write_duration
    );

    Ok(metrics)
}

/// Read a file written by [`write_records`].
pub async fn read_records(path: &Path) -> Result<Vec<Value>, SerializationError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SerializationError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let records: Vec<Value> =
        serde_json::from_str(&content).map_err(|source| SerializationError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}
