use thiserror::Error;

/// Errors from the GitHub simulation.
///
/// Message text is asserted literally by callers, so variants carry the
/// fully formatted message rather than structured fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GithubError {
    /// Repository, branch, or commit absent.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or out-of-contract input.
    #[error("{0}")]
    Validation(String),
}

/// Result alias for GitHub simulation operations.
pub type GithubResult<T> = Result<T, GithubError>;
