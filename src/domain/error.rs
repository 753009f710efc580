use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for loading records into the engine.
///
/// The fold itself cannot fail; these only surface when the input is not
/// a sequence of record-shaped objects.
#[derive(Error, Debug)]
pub enum ConsolidatorError {
    #[error("Input must be a JSON array of error records, found {found}")]
    NotAnArray { found: &'static str },

    #[error("Record at index {index} is not a valid error record: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid consolidation config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
