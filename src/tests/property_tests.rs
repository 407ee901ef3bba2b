use proptest::prelude::*;

use super::{owed, paid};
use crate::core::balances::compute_balances;
use crate::core::models::balance::{OwedRow, PaidRow, PaidSettlementRow, ReceivedSettlementRow};
use crate::core::money::{from_cents, to_cents};
use crate::core::suggestions::suggest_settlements;

const MEMBERS: [&str; 6] = ["ana", "ben", "cho", "dev", "eli", "fay"];

/// Splits each expense between the first `member_count` members, handing the
/// leftover cents to the payer so every expense is fully shared.
fn closed_group_rows(
    member_count: usize,
    amounts: &[u32],
    payer_indexes: &[usize],
) -> (Vec<PaidRow>, Vec<OwedRow>) {
    let mut paid_rows = Vec::new();
    let mut owed_rows = Vec::new();
    for (idx, cents) in amounts.iter().enumerate() {
        let cents = i64::from(*cents);
        let payer = MEMBERS[payer_indexes.get(idx).copied().unwrap_or(0) % member_count];
        paid_rows.push(paid(payer, from_cents(cents)));

        let share = cents / member_count as i64;
        let leftover = cents - share * member_count as i64;
        for member in &MEMBERS[..member_count] {
            let mine = if *member == payer { share + leftover } else { share };
            if mine > 0 {
                owed_rows.push(owed(member, from_cents(mine)));
            }
        }
    }
    (paid_rows, owed_rows)
}

proptest! {
    #[test]
    fn balances_sum_to_zero(
        member_count in 2usize..=6,
        amounts in prop::collection::vec(1u32..=500_000, 0..=25),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=25),
    ) {
        let (paid_rows, owed_rows) = closed_group_rows(member_count, &amounts, &payer_indexes);
        let balances = compute_balances(&paid_rows, &owed_rows, &[], &[]);
        let total: i64 = balances.values().map(|b| to_cents(b.total)).sum();
        prop_assert_eq!(total, 0);
    }

    #[test]
    fn suggestions_are_positive_and_settle_everyone(
        member_count in 2usize..=6,
        amounts in prop::collection::vec(1u32..=500_000, 1..=25),
        payer_indexes in prop::collection::vec(0usize..=5, 1..=25),
    ) {
        let (paid_rows, owed_rows) = closed_group_rows(member_count, &amounts, &payer_indexes);
        let balances = compute_balances(&paid_rows, &owed_rows, &[], &[]);
        let suggestions = suggest_settlements(&balances);
        prop_assert!(suggestions.iter().all(|s| to_cents(s.amount) > 0));
        prop_assert!(suggestions.len() < member_count);

        let paid_settlements: Vec<PaidSettlementRow> = suggestions
            .iter()
            .map(|s| PaidSettlementRow { payer_member_id: s.from_member_id.clone(), amount: s.amount })
            .collect();
        let received_settlements: Vec<ReceivedSettlementRow> = suggestions
            .iter()
            .map(|s| ReceivedSettlementRow { receiver_member_id: s.to_member_id.clone(), amount: s.amount })
            .collect();
        let settled = compute_balances(&paid_rows, &owed_rows, &paid_settlements, &received_settlements);
        prop_assert!(settled.values().all(|b| to_cents(b.total) == 0));
        prop_assert!(suggest_settlements(&settled).is_empty());
    }

    #[test]
    fn suggestions_are_deterministic(
        member_count in 2usize..=6,
        amounts in prop::collection::vec(1u32..=500_000, 0..=25),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=25),
    ) {
        let (paid_rows, owed_rows) = closed_group_rows(member_count, &amounts, &payer_indexes);
        let first = compute_balances(&paid_rows, &owed_rows, &[], &[]);
        let mut reversed_paid = paid_rows.clone();
        reversed_paid.reverse();
        let mut reversed_owed = owed_rows.clone();
        reversed_owed.reverse();
        let second = compute_balances(&reversed_paid, &reversed_owed, &[], &[]);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(suggest_settlements(&first), suggest_settlements(&second));
    }
}
