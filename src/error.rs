//! Error types for quizdb-import
//!
//! Only two failures are fatal to a run: an unreadable export file and an
//! unparsable export file. Everything that goes wrong against the store is
//! aggregated into the run summary instead (missing descriptors during
//! resolution, error strings during commit).

use thiserror::Error;

/// Result type for importer operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Fatal importer errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// Export file could not be read
    #[error("failed to read export file: {0}")]
    Io(#[from] std::io::Error),

    /// Export file is not valid JSON
    #[error("failed to parse export file: {0}")]
    Parse(#[from] serde_json::Error),
}
