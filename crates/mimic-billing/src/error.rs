use thiserror::Error;

use mimic_types::TypeError;

/// Errors from the billing simulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    /// Input length, emptiness, or MDN format violation.
    #[error(transparent)]
    Input(#[from] TypeError),

    /// Backing bill collection missing or the bill itself absent.
    #[error("{0}")]
    Data(String),

    /// AutoPay enrollment attempted twice.
    #[error("Customer is already enrolled in autopay")]
    AlreadyEnrolled,
}

/// Result alias for billing simulation operations.
pub type BillingResult<T> = Result<T, BillingError>;
