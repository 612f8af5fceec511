//! Adapter error types
//!
//! Ports report failures with these types. Services convert them into
//! [`ReportError`] at the pipeline boundary, choosing the kind by the step
//! that failed (a database error while reading history is a fetch error,
//! the same error while writing a report is a persist error).

use progress_tracker_shared::ReportError;
use thiserror::Error;

/// Object storage failures, including reading the local image payload
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not read image {uri}: {reason}")]
    ImageRead { uri: String, reason: String },

    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("Storage request failed")]
    Request(#[from] reqwest::Error),
}

/// Structured database failures
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database returned status {0}")]
    Status(u16),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected database payload: {0}")]
    UnexpectedPayload(String),

    #[error("Malformed database payload")]
    Serialization(#[from] serde_json::Error),

    #[error("Database request failed")]
    Request(#[from] reqwest::Error),
}

/// Device image picker failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PickerError {
    #[error("Photo library permission denied")]
    PermissionDenied,

    #[error("Image picker unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for ReportError {
    fn from(err: StorageError) -> Self {
        ReportError::Upload(err.to_string())
    }
}

impl From<PickerError> for ReportError {
    fn from(err: PickerError) -> Self {
        ReportError::Picker(err.to_string())
    }
}

/// Map a database error raised while reading
pub fn fetch_error(err: DatabaseError) -> ReportError {
    ReportError::Fetch(err.to_string())
}

/// Map a database error raised while writing
pub fn persist_error(err: DatabaseError) -> ReportError {
    ReportError::Persist(err.to_string())
}

/// Result type alias for port implementations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for database port implementations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
