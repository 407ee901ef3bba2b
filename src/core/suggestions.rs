use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::core::models::balance::{MemberBalance, SettlementSuggestion};
use crate::core::money::{from_cents, to_cents};

struct Position<'a> {
    member_id: &'a str,
    cents: i64,
}

fn compare_for_settlement(a: &Position<'_>, b: &Position<'_>) -> Ordering {
    match (a.cents > 0, b.cents > 0) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.member_id.cmp(b.member_id),
    }
}

/// Creditors first, debtors last, by member id within each side. The back
/// debtor pays the front creditor until one is square.
pub fn suggest_settlements(balances: &HashMap<String, MemberBalance>) -> Vec<SettlementSuggestion> {
    let mut positions: Vec<Position<'_>> = balances
        .values()
        .map(|b| Position {
            member_id: &b.member_id,
            cents: to_cents(b.total),
        })
        .filter(|p| p.cents != 0)
        .collect();
    positions.sort_by(compare_for_settlement);

    let mut queue: VecDeque<Position<'_>> = positions.into();
    let mut suggestions = Vec::new();

    while queue.len() >= 2 {
        let (Some(first), Some(last)) = (queue.front(), queue.back()) else {
            break;
        };
        if first.cents <= 0 || last.cents >= 0 {
            break;
        }

        let creditor = first.cents;
        let debt = -last.cents;
        let remainder = creditor - debt;
        let amount = creditor.min(debt);
        suggestions.push(SettlementSuggestion {
            from_member_id: last.member_id.to_string(),
            to_member_id: first.member_id.to_string(),
            amount: from_cents(amount),
        });

        match remainder.cmp(&0) {
            Ordering::Greater => {
                queue.pop_back();
                if let Some(front) = queue.front_mut() {
                    front.cents = remainder;
                }
            }
            Ordering::Less => {
                queue.pop_front();
                if let Some(back) = queue.back_mut() {
                    back.cents = remainder;
                }
            }
            Ordering::Equal => {
                queue.pop_front();
                queue.pop_back();
            }
        }
    }

    suggestions.retain(|s| to_cents(s.amount) > 0);
    debug!("Suggested {} settlements", suggestions.len());
    suggestions
}
