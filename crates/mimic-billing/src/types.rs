//! Typed state for the billing simulation.
//!
//! A bill is keyed by the (call id, MDN) pair; interactions accumulate under
//! sequential `INTERACTION-{n}` / `BILLING_INFO-{n}` ids; the conversation
//! status block remembers how each flow last ended.

use serde::{Deserialize, Serialize};

use mimic_types::SequenceGenerator;

/// One customer bill, seeded by fixtures and read by `get_billing_info`.
///
/// Numeric and boolean fields stay typed in the store; the response layer
/// stringifies them per the wire contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub call_id: String,
    /// Canonical digit form, 8-11 digits.
    pub mdn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outstanding_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_content: Option<String>,
    #[serde(rename = "billduedate", default, skip_serializing_if = "Option::is_none")]
    pub bill_due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_counter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_mtn_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_pay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_due_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charge_counter_list: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Outcome of a `bill` routing call, persisted as an interaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingOutcome {
    pub escalate_reduce_bill: bool,
    pub go_to_main_menu: bool,
    pub message: String,
    pub repeat_maxout: bool,
    /// `"0001"` when escalation was triggered, else `"0000"`.
    pub status_code: String,
    pub status_message: String,
    pub action_type: String,
    pub timestamp: String,
}

/// Outcome of a `default_start_flow` routing call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowOutcome {
    pub password_type: String,
    pub disambig_op_request: bool,
    pub escalate_reduce_bill: bool,
    pub go_to_main_menu: bool,
    pub head_intent: String,
    pub internet_routing: bool,
    pub password_loop: bool,
    pub repeat_maxout: bool,
    pub status_code: String,
    pub status_message: String,
    pub flow_type: String,
    pub timestamp: String,
}

/// One persisted interaction, keyed by a sequential id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    /// A `bill` routing call.
    Billing { id: String, outcome: BillingOutcome },
    /// A `get_billing_info` lookup.
    InfoLookup {
        id: String,
        tag: String,
        end_page_action: String,
        timestamp: String,
    },
}

impl Interaction {
    pub fn id(&self) -> &str {
        match self {
            Interaction::Billing { id, .. } | Interaction::InfoLookup { id, .. } => id,
        }
    }
}

/// How each conversation-ending flow last concluded, if it ran.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autopay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<String>,
}

/// The whole billing simulation state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingState {
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_start_flow: Option<FlowOutcome>,
    #[serde(default)]
    pub conversation_status: ConversationStatus,
    #[serde(default)]
    pub seq: SequenceGenerator,
}

impl BillingState {
    /// Find the bill matching both the call id and the canonical MDN.
    pub fn find_bill(&self, call_id: &str, mdn: &str) -> Option<&Bill> {
        self.bills
            .iter()
            .find(|bill| bill.call_id == call_id && bill.mdn == mdn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Test 1: Bill lookup matches on both call id and mdn ----
    #[test]
    fn bill_lookup_needs_both_keys() {
        let state = BillingState {
            bills: vec![Bill {
                call_id: "CALL_1234abcd".into(),
                mdn: "1234567890".into(),
                outstanding_balance: Some("125.50".into()),
                ..Bill::default()
            }],
            ..BillingState::default()
        };

        assert!(state.find_bill("CALL_1234abcd", "1234567890").is_some());
        assert!(state.find_bill("CALL_1234abcd", "9999999999").is_none());
        assert!(state.find_bill("CALL_other", "1234567890").is_none());
    }

    // ---- Test 2: Interactions round-trip through serde with their kind tag ----
    #[test]
    fn interaction_serde_tagging() {
        let interaction = Interaction::InfoLookup {
            id: "BILLING_INFO-1".into(),
            tag: "billing.action.initviewbill".into(),
            end_page_action: "BillingGeneral".into(),
            timestamp: "2024-01-15 10:30:00".into(),
        };
        let json = serde_json::to_value(&interaction).unwrap();
        assert_eq!(json["kind"], "info_lookup");

        let back: Interaction = serde_json::from_value(json).unwrap();
        assert_eq!(back.id(), "BILLING_INFO-1");
    }
}
