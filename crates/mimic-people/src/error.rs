use thiserror::Error;

use mimic_query::QueryError;
use mimic_types::TypeError;

/// Errors from the People simulation.
///
/// Message text is asserted literally by callers; lookup and validation
/// variants carry the fully formatted message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeopleError {
    /// Person, directory person, or contact group absent.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or out-of-contract input.
    #[error("{0}")]
    Validation(String),

    /// Missing required field mask or bad sort order.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Resource-key prefix or format violation.
    #[error(transparent)]
    Key(#[from] TypeError),
}

/// Result alias for People simulation operations.
pub type PeopleResult<T> = Result<T, PeopleError>;
