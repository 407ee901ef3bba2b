use std::collections::HashMap;

use log::debug;

use crate::core::models::balance::{
    BalanceRows, MemberBalance, OwedRow, PaidRow, PaidSettlementRow, ReceivedSettlementRow,
};
use crate::core::money::{from_cents, to_cents};

#[derive(Default)]
struct Tally {
    paid: i64,
    owed: i64,
    adjustment: i64,
}

/// `total` is `paid - owed`, plus settlements the member paid, minus those
/// received. Every row is counted; duplicates are the reader's problem.
pub fn compute_balances(
    paid_rows: &[PaidRow],
    owed_rows: &[OwedRow],
    paid_settlements: &[PaidSettlementRow],
    received_settlements: &[ReceivedSettlementRow],
) -> HashMap<String, MemberBalance> {
    let mut tallies: HashMap<&str, Tally> = HashMap::new();

    for row in paid_rows {
        tallies.entry(row.member_id.as_str()).or_default().paid += to_cents(row.amount);
    }
    for row in owed_rows {
        tallies.entry(row.member_id.as_str()).or_default().owed += to_cents(row.amount);
    }
    for row in paid_settlements {
        tallies.entry(row.payer_member_id.as_str()).or_default().adjustment += to_cents(row.amount);
    }
    for row in received_settlements {
        tallies.entry(row.receiver_member_id.as_str()).or_default().adjustment -= to_cents(row.amount);
    }

    let balances: HashMap<String, MemberBalance> = tallies
        .into_iter()
        .map(|(member_id, tally)| {
            let balance = MemberBalance {
                member_id: member_id.to_string(),
                paid: from_cents(tally.paid),
                owed: from_cents(tally.owed),
                total: from_cents(tally.paid - tally.owed + tally.adjustment),
            };
            (member_id.to_string(), balance)
        })
        .collect();

    debug!("Computed balances for {} members", balances.len());
    balances
}

/// Convenience wrapper over [`compute_balances`] for a bundle of rows.
pub fn compute_balances_from_rows(rows: &BalanceRows) -> HashMap<String, MemberBalance> {
    compute_balances(
        &rows.paid,
        &rows.owed,
        &rows.paid_settlements,
        &rows.received_settlements,
    )
}
