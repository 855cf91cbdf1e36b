use thiserror::Error;

/// Result type for storage-backed operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures raised by a storage backend.
///
/// These are infrastructure failures, not business outcomes: absence of a
/// record is reported as `None`/`false` by the repository, never as an error.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid item id: {0}")]
    InvalidItemId(String),
}
