use thiserror::Error;

/// Errors from query-pipeline parameter handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// An endpoint that requires a field mask received none (or an empty one).
    /// Asserted eagerly, before the collection is touched.
    #[error("read_mask is required for {operation}")]
    MissingFieldMask { operation: String },

    /// The sort order string is not one of the supported values.
    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),
}

/// Result alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
