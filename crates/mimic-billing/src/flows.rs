//! Conversation flows: ending actions, AutoPay enrollment, and routing.
//!
//! Each ending action (escalate, fail, cancel, ghost, done) validates its
//! optional free-text reason against a length cap, fills the flow's default
//! wording when none is given, and records how the conversation closed.
//! `bill` and `default_start_flow` route on their flags and share one status
//! table: escalation and repeat-maxout produce code `"0001"`, everything
//! else `"0000"`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mimic_types::bounded_string;

use crate::clock::{current_stamp, next_billing_cycle};
use crate::error::{BillingError, BillingResult};
use crate::types::{BillingOutcome, BillingState, FlowOutcome, Interaction};

const REASON_CAP: usize = 5_000;
const MESSAGE_CAP: usize = 1_000;
const DONE_CAP: usize = 10_000_000;

const ESCALATED_STATUS: &str = "Escalated to human agent for bill reduction";
const MAIN_MENU_STATUS: &str = "Returning to main menu";
const MAXOUT_STATUS: &str = "Repeat maxout reached - escalation triggered";

/// How a conversation-ending action reports itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationClose {
    pub action: String,
    pub reason: String,
    pub status: String,
}

/// A successful AutoPay enrollment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutopayEnrollment {
    pub status: String,
    pub discount_amount: String,
    pub enrollment_type: String,
    pub next_billing_cycle: String,
    pub timestamp: String,
}

/// Flags accepted by [`bill`].
#[derive(Clone, Debug, Default)]
pub struct BillParams {
    pub escalate_reduce_bill: Option<bool>,
    pub go_to_main_menu: Option<bool>,
    pub message: Option<String>,
    pub repeat_maxout: Option<bool>,
}

/// Flags accepted by [`default_start_flow`].
#[derive(Clone, Debug, Default)]
pub struct StartFlowParams {
    pub password_type: Option<String>,
    pub disambig_op_request: Option<bool>,
    pub escalate_reduce_bill: Option<bool>,
    pub go_to_main_menu: Option<bool>,
    pub head_intent: Option<String>,
    pub internet_routing: Option<bool>,
    pub password_loop: Option<bool>,
    pub repeat_maxout: Option<bool>,
}

/// The shared escalation routing table.
fn route_status(
    escalate_reduce_bill: bool,
    go_to_main_menu: bool,
    repeat_maxout: bool,
    default_message: &str,
) -> (String, String) {
    if escalate_reduce_bill {
        ("0001".to_string(), ESCALATED_STATUS.to_string())
    } else if go_to_main_menu {
        ("0000".to_string(), MAIN_MENU_STATUS.to_string())
    } else if repeat_maxout {
        ("0001".to_string(), MAXOUT_STATUS.to_string())
    } else {
        ("0000".to_string(), default_message.to_string())
    }
}

/// Escalate to a human agent.
pub fn escalate(state: &mut BillingState, input: Option<&str>) -> BillingResult<ConversationClose> {
    let reason = bounded_string(input, "input", REASON_CAP)?
        .unwrap_or_else(|| "You will be connected to a human agent shortly.".to_string());
    state.conversation_status.escalate = Some(reason.clone());
    debug!("conversation escalated");
    Ok(ConversationClose {
        action: "escalate".to_string(),
        reason,
        status: "You will be connected to a human agent shortly.".to_string(),
    })
}

/// Fail the task because the customer could not be understood.
pub fn fail(state: &mut BillingState, input: Option<&str>) -> BillingResult<ConversationClose> {
    let reason = bounded_string(input, "input", REASON_CAP)?.unwrap_or_else(|| {
        "I'm sorry, I'm unable to help with that at the moment. Please try again later.".to_string()
    });
    state.conversation_status.fail = Some(reason.clone());
    Ok(ConversationClose {
        action: "fail".to_string(),
        reason,
        status: "I'm sorry, I'm unable to help with that at the moment. Please try again later."
            .to_string(),
    })
}

/// Cancel at the customer's request. An empty reason gets the default too.
pub fn cancel(state: &mut BillingState, input: Option<&str>) -> BillingResult<ConversationClose> {
    let reason = match bounded_string(input, "input", REASON_CAP)? {
        Some(text) if !text.is_empty() => text,
        _ => "Okay, I have canceled this request.".to_string(),
    };
    state.conversation_status.cancel = Some(reason.clone());
    Ok(ConversationClose {
        action: "cancel".to_string(),
        reason,
        status: "Okay, I have canceled this request.".to_string(),
    })
}

/// Close out after the customer stopped responding.
pub fn ghost(state: &mut BillingState) -> ConversationClose {
    state.conversation_status.ghost = Some("No user response after 3 attempts".to_string());
    ConversationClose {
        action: "ghost".to_string(),
        reason: "No user response after 3 attempts".to_string(),
        status: "User has been ghosted".to_string(),
    }
}

/// Mark the task complete.
pub fn done(state: &mut BillingState, input: Option<&str>) -> BillingResult<ConversationClose> {
    let reason = match bounded_string(input, "input", DONE_CAP)? {
        Some(text) if !text.is_empty() => text,
        _ => "completed the task.".to_string(),
    };
    // The recorded status is the fixed wording, not the caller's reason.
    state.conversation_status.done = Some("completed the task.".to_string());
    Ok(ConversationClose {
        action: "done".to_string(),
        reason,
        status: "Request has been completed".to_string(),
    })
}

/// Enroll the customer in AutoPay. Enrolling twice is an error.
pub fn autopay(state: &mut BillingState) -> BillingResult<AutopayEnrollment> {
    if state.conversation_status.autopay.is_some() {
        return Err(BillingError::AlreadyEnrolled);
    }
    let status = "Successfully enrolled in Autopay".to_string();
    state.conversation_status.autopay = Some(status.clone());
    debug!("autopay enrollment recorded");
    Ok(AutopayEnrollment {
        status,
        discount_amount: "$10.00".to_string(),
        enrollment_type: "automatic".to_string(),
        next_billing_cycle: next_billing_cycle(),
        timestamp: current_stamp(),
    })
}

/// Route a billing request and persist it as an `INTERACTION-{n}` record.
pub fn bill(state: &mut BillingState, params: &BillParams) -> BillingResult<BillingOutcome> {
    let message = bounded_string(params.message.as_deref(), "message", MESSAGE_CAP)?
        .unwrap_or_else(|| "Customer requesting billing information".to_string());

    let escalate_reduce_bill = params.escalate_reduce_bill.unwrap_or(false);
    let go_to_main_menu = params.go_to_main_menu.unwrap_or(false);
    let repeat_maxout = params.repeat_maxout.unwrap_or(false);

    let default_message = if params.message.is_some() {
        message.as_str()
    } else {
        "Billing request processed"
    };
    let (status_code, status_message) = route_status(
        escalate_reduce_bill,
        go_to_main_menu,
        repeat_maxout,
        default_message,
    );

    let outcome = BillingOutcome {
        escalate_reduce_bill,
        go_to_main_menu,
        message,
        repeat_maxout,
        status_code,
        status_message,
        action_type: "billing_request".to_string(),
        timestamp: current_stamp(),
    };

    let id = state.seq.next_labeled("INTERACTION");
    debug!(%id, code = %outcome.status_code, "billing interaction recorded");
    state.interactions.push(Interaction::Billing {
        id,
        outcome: outcome.clone(),
    });
    Ok(outcome)
}

/// Run the initial routing flow and remember its outcome.
pub fn default_start_flow(
    state: &mut BillingState,
    params: &StartFlowParams,
) -> BillingResult<FlowOutcome> {
    let escalate_reduce_bill = params.escalate_reduce_bill.unwrap_or(false);
    let go_to_main_menu = params.go_to_main_menu.unwrap_or(false);
    let repeat_maxout = params.repeat_maxout.unwrap_or(false);

    let (status_code, status_message) = route_status(
        escalate_reduce_bill,
        go_to_main_menu,
        repeat_maxout,
        "Default start flow initiated",
    );

    let outcome = FlowOutcome {
        password_type: params
            .password_type
            .clone()
            .unwrap_or_else(|| "voice".to_string()),
        disambig_op_request: params.disambig_op_request.unwrap_or(false),
        escalate_reduce_bill,
        go_to_main_menu,
        head_intent: params
            .head_intent
            .clone()
            .unwrap_or_else(|| "billing_inquiry".to_string()),
        internet_routing: params.internet_routing.unwrap_or(false),
        password_loop: params.password_loop.unwrap_or(false),
        repeat_maxout,
        status_code,
        status_message,
        flow_type: "default_start".to_string(),
        timestamp: current_stamp(),
    };

    state.default_start_flow = Some(outcome.clone());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Test 1: Ending actions fill their default wording ----
    #[test]
    fn ending_actions_use_defaults() {
        let mut state = BillingState::default();

        let close = escalate(&mut state, None).unwrap();
        assert_eq!(close.action, "escalate");
        assert_eq!(close.reason, "You will be connected to a human agent shortly.");
        assert_eq!(
            state.conversation_status.escalate.as_deref(),
            Some("You will be connected to a human agent shortly.")
        );

        let close = cancel(&mut state, Some("")).unwrap();
        assert_eq!(close.reason, "Okay, I have canceled this request.");

        let close = done(&mut state, Some("paid the bill")).unwrap();
        assert_eq!(close.reason, "paid the bill");
        assert_eq!(close.status, "Request has been completed");
        // The stored status keeps the fixed wording.
        assert_eq!(
            state.conversation_status.done.as_deref(),
            Some("completed the task.")
        );
    }

    // ---- Test 2: Over-cap reasons are rejected with the field name ----
    #[test]
    fn over_cap_reason_rejected() {
        let mut state = BillingState::default();
        let long = "x".repeat(5_001);
        let err = escalate(&mut state, Some(&long)).unwrap_err();
        assert_eq!(err.to_string(), "input must not exceed 5000 characters");
    }

    // ---- Test 3: AutoPay enrolls once, then errors ----
    #[test]
    fn autopay_enrolls_once() {
        let mut state = BillingState::default();
        let enrollment = autopay(&mut state).unwrap();
        assert_eq!(enrollment.status, "Successfully enrolled in Autopay");
        assert_eq!(enrollment.discount_amount, "$10.00");

        let err = autopay(&mut state).unwrap_err();
        assert_eq!(err, BillingError::AlreadyEnrolled);
        assert_eq!(err.to_string(), "Customer is already enrolled in autopay");
    }

    // ---- Test 4: Bill routing table and sequential interaction ids ----
    #[test]
    fn bill_routes_and_persists() {
        let mut state = BillingState::default();

        let outcome = bill(&mut state, &BillParams::default()).unwrap();
        assert_eq!(outcome.status_code, "0000");
        assert_eq!(outcome.status_message, "Billing request processed");
        assert_eq!(outcome.message, "Customer requesting billing information");

        let outcome = bill(
            &mut state,
            &BillParams {
                escalate_reduce_bill: Some(true),
                ..BillParams::default()
            },
        )
        .unwrap();
        assert_eq!(outcome.status_code, "0001");
        assert_eq!(outcome.status_message, "Escalated to human agent for bill reduction");

        let outcome = bill(
            &mut state,
            &BillParams {
                repeat_maxout: Some(true),
                ..BillParams::default()
            },
        )
        .unwrap();
        assert_eq!(outcome.status_code, "0001");
        assert_eq!(
            outcome.status_message,
            "Repeat maxout reached - escalation triggered"
        );

        let ids: Vec<&str> = state.interactions.iter().map(Interaction::id).collect();
        assert_eq!(ids, ["INTERACTION-1", "INTERACTION-2", "INTERACTION-3"]);
    }

    // ---- Test 5: A caller message becomes the status message ----
    #[test]
    fn bill_message_flows_to_status() {
        let mut state = BillingState::default();
        let outcome = bill(
            &mut state,
            &BillParams {
                message: Some("Why is my bill higher this month?".into()),
                ..BillParams::default()
            },
        )
        .unwrap();
        assert_eq!(outcome.status_message, "Why is my bill higher this month?");
        assert_eq!(outcome.status_code, "0000");
    }

    // ---- Test 6: Start flow defaults and escalation ----
    #[test]
    fn start_flow_defaults_and_escalation() {
        let mut state = BillingState::default();
        let outcome = default_start_flow(&mut state, &StartFlowParams::default()).unwrap();
        assert_eq!(outcome.password_type, "voice");
        assert_eq!(outcome.head_intent, "billing_inquiry");
        assert_eq!(outcome.status_message, "Default start flow initiated");
        assert!(state.default_start_flow.is_some());

        let outcome = default_start_flow(
            &mut state,
            &StartFlowParams {
                go_to_main_menu: Some(true),
                ..StartFlowParams::default()
            },
        )
        .unwrap();
        assert_eq!(outcome.status_code, "0000");
        assert_eq!(outcome.status_message, "Returning to main menu");
    }
}
