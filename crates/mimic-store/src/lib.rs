//! In-process JSON-backed state store for the Mimic simulations.
//!
//! Each simulation owns a typed state struct (its collections plus sequence
//! counters). [`JsonStore`] wraps one such value and adds JSON snapshot
//! save/load. The store is an explicit, owned object that callers pass into
//! endpoint logic — there is no process-wide singleton, so each test or
//! session constructs its own instance and isolation is structural.
//!
//! Endpoint operations borrow the state `&mut`, which makes the
//! single-threaded access contract a compile-time property rather than a
//! runtime convention.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::JsonStore;
