//! Foundation types for the Mimic simulated API backends.
//!
//! This crate provides the validation and normalization primitives shared by
//! every simulation crate. Every other Mimic crate depends on `mimic-types`.
//!
//! # Key pieces
//!
//! - [`normalize_phone_number`] — Canonical digit-string form of a phone number
//! - [`validate_mdn`] — 8–11 digit mobile directory number validation
//! - [`ResourceKey`] — Prefix-checked resource identifiers (`people/…`, …)
//! - [`bounded_string`] — Length-capped free-text input validation
//! - [`SequenceGenerator`] — Deterministic sequential record identifiers
//! - [`iso_now`] — ISO-8601 UTC timestamps for record stamping

pub mod error;
pub mod ids;
pub mod normalize;
pub mod resource;

pub use error::TypeError;
pub use ids::{iso_now, SequenceGenerator};
pub use normalize::{bounded_string, normalize_phone_number, validate_mdn};
pub use resource::ResourceKey;
