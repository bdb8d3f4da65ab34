//! Bill lookup: `get_billing_info`.
//!
//! Resolves a bill by the session's (call id, MDN) pair and returns the
//! stringified parameter block. The MDN is reduced to its canonical digit
//! form before matching, so `"(123) 456-7890"` finds a bill stored under
//! `"1234567890"`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mimic_types::{bounded_string, validate_mdn, TypeError};

use crate::clock::current_stamp;
use crate::error::{BillingError, BillingResult};
use crate::types::{Bill, BillingState, Interaction};

const TAG_CAP: usize = 100;
const CALL_ID_CAP: usize = 100;
const END_PAGE_ACTION_CAP: usize = 50;

/// The fulfillment block of a billing-info request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// The session parameters of a billing-info request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParameters {
    pub call_id: String,
    pub mdn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_page_action: Option<String>,
}

/// The session block of a billing-info request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub parameters: SessionParameters,
}

/// The stringified parameter block of a billing-info response.
///
/// Every numeric and boolean store field comes back as a string; absent
/// fields stay null rather than defaulting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingParameters {
    pub outstanding_balance: Option<String>,
    pub additional_content: Option<String>,
    #[serde(rename = "billduedate")]
    pub bill_due_date: Option<String>,
    pub charge_counter: Option<String>,
    pub active_mtn_count: Option<String>,
    pub auto_pay: Option<String>,
    pub past_due_balance: Option<String>,
    pub charge_counter_list: Option<Vec<String>>,
    pub last_paid_date: Option<String>,
    pub last_payment_amount: Option<String>,
    pub status_code: String,
    pub content: Option<String>,
    pub status_message: String,
}

/// The session block of a billing-info response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSessionInfo {
    pub parameters: BillingParameters,
}

/// A billing-info response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfoResponse {
    pub session_info: ResponseSessionInfo,
}

fn validate_call_id(raw: &str) -> BillingResult<String> {
    if raw.trim().is_empty() {
        return Err(TypeError::Empty {
            field: "callId".to_string(),
        }
        .into());
    }
    let validated = bounded_string(Some(raw), "callId", CALL_ID_CAP)?;
    Ok(validated.unwrap_or_default())
}

fn stringify_parameters(bill: &Bill) -> BillingParameters {
    BillingParameters {
        outstanding_balance: bill.outstanding_balance.clone(),
        additional_content: bill.additional_content.clone(),
        bill_due_date: bill.bill_due_date.clone(),
        charge_counter: bill.charge_counter.map(|n| n.to_string()),
        active_mtn_count: bill.active_mtn_count.map(|n| n.to_string()),
        auto_pay: bill.auto_pay.map(|b| b.to_string()),
        past_due_balance: bill.past_due_balance.clone(),
        charge_counter_list: if bill.charge_counter_list.is_empty() {
            None
        } else {
            Some(
                bill.charge_counter_list
                    .iter()
                    .map(u32::to_string)
                    .collect(),
            )
        },
        last_paid_date: bill.last_paid_date.clone(),
        last_payment_amount: bill.last_payment_amount.clone(),
        status_code: "0000".to_string(),
        content: bill.content.clone(),
        status_message: "Success".to_string(),
    }
}

/// Look up a customer's bill and record the lookup as a `BILLING_INFO-{n}`
/// interaction.
///
/// # Errors
///
/// - Empty bills collection: `No bills found in database`
/// - Out-of-contract MDN: `mdn must be 8-11 digits`
/// - No matching bill: `Bill not found for callId: {call_id} and mdn: {mdn}`
pub fn get_billing_info(
    state: &mut BillingState,
    fulfillment: &FulfillmentInfo,
    session: &SessionInfo,
) -> BillingResult<BillingInfoResponse> {
    let tag = bounded_string(fulfillment.tag.as_deref(), "tag", TAG_CAP)?
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "billing.action.initviewbill".to_string());
    let end_page_action = bounded_string(
        session.parameters.end_page_action.as_deref(),
        "endPageAction",
        END_PAGE_ACTION_CAP,
    )?
    .filter(|a| !a.is_empty())
    .unwrap_or_else(|| "BillingGeneral".to_string());

    if state.bills.is_empty() {
        return Err(BillingError::Data("No bills found in database".to_string()));
    }

    let call_id = validate_call_id(&session.parameters.call_id)?;
    let mdn = validate_mdn(&session.parameters.mdn)?;

    let bill = state.find_bill(&call_id, &mdn).ok_or_else(|| {
        BillingError::Data(format!(
            "Bill not found for callId: {call_id} and mdn: {mdn}"
        ))
    })?;
    let parameters = stringify_parameters(bill);

    let id = state.seq.next_labeled("BILLING_INFO");
    debug!(%id, %call_id, "billing info lookup recorded");
    state.interactions.push(Interaction::InfoLookup {
        id,
        tag,
        end_page_action,
        timestamp: current_stamp(),
    });

    Ok(BillingInfoResponse {
        session_info: ResponseSessionInfo { parameters },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> BillingState {
        BillingState {
            bills: vec![Bill {
                call_id: "CALL_1234abcd".into(),
                mdn: "1234567890".into(),
                outstanding_balance: Some("125.50".into()),
                bill_due_date: Some("2024-02-01".into()),
                charge_counter: Some(3),
                active_mtn_count: Some(2),
                auto_pay: Some(false),
                past_due_balance: Some("0.00".into()),
                charge_counter_list: vec![1, 2, 3],
                last_paid_date: Some("2024-01-01".into()),
                last_payment_amount: Some("110.00".into()),
                content: Some("Monthly statement".into()),
                additional_content: None,
            }],
            ..BillingState::default()
        }
    }

    fn session(call_id: &str, mdn: &str) -> SessionInfo {
        SessionInfo {
            parameters: SessionParameters {
                call_id: call_id.into(),
                mdn: mdn.into(),
                end_page_action: None,
            },
        }
    }

    // ---- Test 1: Lookup stringifies the parameter block ----
    #[test]
    fn lookup_stringifies_parameters() {
        let mut state = seeded();
        let response = get_billing_info(
            &mut state,
            &FulfillmentInfo::default(),
            &session("CALL_1234abcd", "1234567890"),
        )
        .unwrap();

        let params = &response.session_info.parameters;
        assert_eq!(params.outstanding_balance.as_deref(), Some("125.50"));
        assert_eq!(params.charge_counter.as_deref(), Some("3"));
        assert_eq!(params.auto_pay.as_deref(), Some("false"));
        assert_eq!(
            params.charge_counter_list,
            Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
        );
        assert_eq!(params.status_code, "0000");
        assert_eq!(params.status_message, "Success");
    }

    // ---- Test 2: The MDN is canonicalized before matching ----
    #[test]
    fn mdn_canonicalized_before_match() {
        let mut state = seeded();
        let response = get_billing_info(
            &mut state,
            &FulfillmentInfo::default(),
            &session("CALL_1234abcd", "(123) 456-7890"),
        );
        assert!(response.is_ok());
    }

    // ---- Test 3: Contract violations carry exact message text ----
    #[test]
    fn contract_violation_messages() {
        let mut empty = BillingState::default();
        let err = get_billing_info(
            &mut empty,
            &FulfillmentInfo::default(),
            &session("CALL_1234abcd", "1234567890"),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "No bills found in database");

        let mut state = seeded();
        let err = get_billing_info(
            &mut state,
            &FulfillmentInfo::default(),
            &session("CALL_1234abcd", "123"),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "mdn must be 8-11 digits");

        let err = get_billing_info(
            &mut state,
            &FulfillmentInfo::default(),
            &session("CALL_other", "1234567890"),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bill not found for callId: CALL_other and mdn: 1234567890"
        );
    }

    // ---- Test 4: Each lookup records a sequential interaction ----
    #[test]
    fn lookup_records_interaction() {
        let mut state = seeded();
        get_billing_info(
            &mut state,
            &FulfillmentInfo {
                tag: Some("billing.action.viewbill".into()),
            },
            &session("CALL_1234abcd", "1234567890"),
        )
        .unwrap();

        assert_eq!(state.interactions.len(), 1);
        assert_eq!(state.interactions[0].id(), "BILLING_INFO-1");
        match &state.interactions[0] {
            Interaction::InfoLookup { tag, end_page_action, .. } => {
                assert_eq!(tag, "billing.action.viewbill");
                assert_eq!(end_page_action, "BillingGeneral");
            }
            other => panic!("unexpected interaction: {other:?}"),
        }
    }

    // ---- Test 5: Empty call ids are rejected before lookup ----
    #[test]
    fn empty_call_id_rejected() {
        let mut state = seeded();
        let err = get_billing_info(
            &mut state,
            &FulfillmentInfo::default(),
            &session("   ", "1234567890"),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "callId cannot be empty or whitespace-only");
    }
}
