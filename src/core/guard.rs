use log::debug;

use crate::core::models::balance::{DenialReason, MaxSettlement, SettlementSuggestion};
use crate::core::models::settlement::Settlement;
use crate::core::money::{from_cents, to_cents};

/// Current suggestion for the ordered pair minus what the payer already
/// sent the receiver. Recompute under the group's settlement lock before writing.
pub fn cap_settlement(
    has_expenses: bool,
    suggestions: &[SettlementSuggestion],
    settlements: &[Settlement],
    payer_member_id: &str,
    receiver_member_id: &str,
) -> MaxSettlement {
    if !has_expenses {
        return MaxSettlement::denied(DenialReason::NoExpenses);
    }

    let suggested = suggestions
        .iter()
        .find(|s| s.from_member_id == payer_member_id && s.to_member_id == receiver_member_id)
        .map(|s| to_cents(s.amount))
        .filter(|cents| *cents > 0);
    let Some(suggested) = suggested else {
        return MaxSettlement::denied(DenialReason::NothingOwedBetweenMembers);
    };

    let already_recorded: i64 = settlements
        .iter()
        .filter(|s| {
            s.is_completed()
                && s.payer_member_id == payer_member_id
                && s.receiver_member_id == receiver_member_id
        })
        .map(|s| to_cents(s.amount))
        .sum();

    let remaining = suggested - already_recorded;
    debug!(
        "Settlement cap {} -> {}: suggested {} recorded {} remaining {}",
        payer_member_id, receiver_member_id, suggested, already_recorded, remaining
    );
    if remaining <= 0 {
        return MaxSettlement::denied(DenialReason::AlreadySettled);
    }
    MaxSettlement::allowed(from_cents(remaining))
}

/// Clamps a requested amount to the guard's cap. `None` when the guard denies
/// the pair or nothing positive is left to record.
pub fn clamp_to_cap(requested: f64, cap: &MaxSettlement) -> Option<f64> {
    if !cap.allowed {
        return None;
    }
    let cents = to_cents(requested).min(to_cents(cap.max_amount));
    (cents > 0).then(|| from_cents(cents))
}
