//! Simulated telecom billing assistant backend.
//!
//! State lives in a [`BillingState`]: a seeded bill collection, an append-only
//! interaction log, and a conversation status block. Operations split into
//! conversation flows (`escalate`, `fail`, `cancel`, `ghost`, `done`,
//! `autopay`, `bill`, `default_start_flow`) and the bill lookup
//! (`get_billing_info`).
//!
//! # Invariants
//!
//! - Interaction ids are sequential per state (`INTERACTION-{n}`,
//!   `BILLING_INFO-{n}` share one counter).
//! - A bill is addressed by its (call id, canonical MDN) pair.
//! - AutoPay enrollment happens at most once per state.

mod clock;
pub mod error;
pub mod flows;
pub mod info;
pub mod types;

pub use error::{BillingError, BillingResult};
pub use flows::{
    autopay, bill, cancel, default_start_flow, done, escalate, fail, ghost, AutopayEnrollment,
    BillParams, ConversationClose, StartFlowParams,
};
pub use info::{
    get_billing_info, BillingInfoResponse, BillingParameters, FulfillmentInfo,
    ResponseSessionInfo, SessionInfo, SessionParameters,
};
pub use types::{
    Bill, BillingOutcome, BillingState, ConversationStatus, FlowOutcome, Interaction,
};
