/// Errors from store snapshot operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Snapshot serialization or deserialization failure.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// I/O error reading or writing a snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
