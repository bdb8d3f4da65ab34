use thiserror::Error;

/// Errors produced by validation and normalization primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A mobile directory number failed the 8–11 digit contract.
    #[error("mdn must be 8-11 digits")]
    InvalidMdn,

    /// A free-text input exceeded its length cap.
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: String, max: usize },

    /// A free-text input had the wrong shape (empty where required).
    #[error("{field} cannot be empty or whitespace-only")]
    Empty { field: String },

    /// A resource key did not carry its collection's prefix.
    #[error("Resource name must start with \"{prefix}\"")]
    BadResourcePrefix { prefix: String },
}

/// Convenience alias for validation results.
pub type Result<T> = std::result::Result<T, TypeError>;
