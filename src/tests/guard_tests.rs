use super::completed_settlement;
use crate::core::guard::{cap_settlement, clamp_to_cap};
use crate::core::models::balance::{DenialReason, MaxSettlement, SettlementSuggestion};
use crate::core::models::settlement::SettlementStatus;

fn b_owes_a(amount: f64) -> Vec<SettlementSuggestion> {
    vec![SettlementSuggestion {
        from_member_id: "b".to_string(),
        to_member_id: "a".to_string(),
        amount,
    }]
}

#[test]
fn test_full_suggestion_allowed_without_prior_settlements() {
    let _ = env_logger::try_init();
    let cap = cap_settlement(true, &b_owes_a(50.0), &[], "b", "a");
    assert_eq!(cap, MaxSettlement::allowed(50.0));
}

#[test]
fn test_prior_settlement_of_full_amount_is_denied() {
    let _ = env_logger::try_init();
    let prior = [completed_settlement("b", "a", 50.0)];
    let cap = cap_settlement(true, &b_owes_a(50.0), &prior, "b", "a");
    assert!(!cap.allowed);
    assert_eq!(cap.max_amount, 0.0);
    assert_eq!(cap.reason, Some(DenialReason::AlreadySettled));
}

#[test]
fn test_partial_prior_settlement_reduces_cap() {
    let _ = env_logger::try_init();
    let prior = [
        completed_settlement("b", "a", 12.5),
        completed_settlement("b", "a", 7.5),
        completed_settlement("a", "b", 30.0),
        completed_settlement("c", "a", 30.0),
    ];
    let cap = cap_settlement(true, &b_owes_a(50.0), &prior, "b", "a");
    assert_eq!(cap, MaxSettlement::allowed(30.0));
}

#[test]
fn test_pending_settlements_do_not_count() {
    let _ = env_logger::try_init();
    let mut pending = completed_settlement("b", "a", 50.0);
    pending.status = SettlementStatus::Pending;
    let cap = cap_settlement(true, &b_owes_a(50.0), &[pending], "b", "a");
    assert_eq!(cap, MaxSettlement::allowed(50.0));
}

#[test]
fn test_group_without_expenses_is_denied() {
    let _ = env_logger::try_init();
    let cap = cap_settlement(false, &[], &[], "b", "a");
    assert_eq!(cap, MaxSettlement::denied(DenialReason::NoExpenses));
    assert_eq!(cap.reason.map(|r| r.to_string()).as_deref(), Some("No expenses in this group"));
}

#[test]
fn test_pair_without_suggestion_is_denied() {
    let _ = env_logger::try_init();
    let cap = cap_settlement(true, &b_owes_a(50.0), &[], "a", "b");
    assert_eq!(cap.reason, Some(DenialReason::NothingOwedBetweenMembers));
    assert_eq!(
        DenialReason::NothingOwedBetweenMembers.to_string(),
        "Already settled between these members"
    );

    let cap = cap_settlement(true, &b_owes_a(50.0), &[], "c", "a");
    assert!(!cap.allowed);
    assert_eq!(cap.reason, Some(DenialReason::NothingOwedBetweenMembers));
}

#[test]
fn test_clamp_to_cap() {
    let _ = env_logger::try_init();
    let cap = MaxSettlement::allowed(50.0);
    assert_eq!(clamp_to_cap(80.0, &cap), Some(50.0));
    assert_eq!(clamp_to_cap(20.256, &cap), Some(20.26));
    assert_eq!(clamp_to_cap(0.001, &cap), None);
    assert_eq!(clamp_to_cap(10.0, &MaxSettlement::denied(DenialReason::AlreadySettled)), None);
}
