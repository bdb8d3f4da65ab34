//! Phone-number, MDN, and free-text normalization helpers.
//!
//! The simulations match phone numbers on their canonical digit form, so a
//! query of `"(555) 010"` finds a stored `"+1 555-0100"`. MDNs (mobile
//! directory numbers) additionally carry a hard 8–11 digit contract; anything
//! outside that range is a caller error, not a soft miss.

use crate::error::{Result, TypeError};

/// Reduce a phone number to its canonical digit string.
///
/// Strips every non-digit character (spaces, dashes, dots, parentheses, a
/// leading `+`). Returns `None` when nothing remains — callers treat that as
/// "not a phone-like value" rather than an error.
///
/// # Examples
///
/// ```
/// use mimic_types::normalize_phone_number;
///
/// assert_eq!(normalize_phone_number("(123) 456-7890").as_deref(), Some("1234567890"));
/// assert_eq!(normalize_phone_number("+1 555.010.0"), Some("15550100".to_string()));
/// assert_eq!(normalize_phone_number("call me"), None);
/// ```
pub fn normalize_phone_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Validate a mobile directory number, returning its canonical digit form.
///
/// Formatting characters are stripped first, so `"(123) 456-7890"` validates
/// to `"1234567890"`. The digit count must be between 8 and 11 inclusive.
///
/// # Errors
///
/// Returns [`TypeError::InvalidMdn`] when the stripped value is not 8–11
/// digits. The message text is part of the observable contract.
pub fn validate_mdn(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if (8..=11).contains(&digits.len()) {
        Ok(digits)
    } else {
        Err(TypeError::InvalidMdn)
    }
}

/// Validate an optional free-text input against a length cap.
///
/// `None` passes through unchanged; empty strings are preserved (the billing
/// flows distinguish "no message" from "empty message").
///
/// # Errors
///
/// Returns [`TypeError::TooLong`] when the input exceeds `max` characters.
pub fn bounded_string(value: Option<&str>, field: &str, max: usize) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(text) => {
            if text.chars().count() > max {
                return Err(TypeError::TooLong {
                    field: field.to_string(),
                    max,
                });
            }
            Ok(Some(text.to_string()))
        }
    }
}
