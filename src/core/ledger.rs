use std::collections::{HashMap, HashSet};

use crate::core::balances::compute_balances_from_rows;
use crate::core::guard::cap_settlement;
use crate::core::models::balance::{
    BalanceRows, MaxSettlement, MemberBalance, OwedRow, PaidRow, PaidSettlementRow,
    ReceivedSettlementRow, SettlementSuggestion,
};
use crate::core::models::expense::Expense;
use crate::core::models::group::Group;
use crate::core::models::settlement::Settlement;
use crate::core::money::{from_cents, to_cents};
use crate::core::suggestions::suggest_settlements;

#[derive(Clone, Debug)]
pub struct GroupLedger {
    pub group: Group,
    expenses: Vec<Expense>,
    settlements: Vec<Settlement>,
}

impl GroupLedger {
    /// Keeps one expense per bank transaction and only completed settlements.
    pub fn new(group: Group, expenses: Vec<Expense>, settlements: Vec<Settlement>) -> Self {
        let mut seen = HashSet::new();
        let expenses = expenses
            .into_iter()
            .filter(|e| seen.insert(e.transaction_id.clone()))
            .collect();
        let settlements = settlements.into_iter().filter(Settlement::is_completed).collect();
        GroupLedger {
            group,
            expenses,
            settlements,
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn has_expenses(&self) -> bool {
        !self.expenses.is_empty()
    }

    pub fn total_spend(&self) -> f64 {
        from_cents(self.expenses.iter().map(|e| to_cents(e.amount.abs())).sum())
    }

    pub fn balance_rows(&self) -> BalanceRows {
        let mut rows = BalanceRows::default();

        for expense in &self.expenses {
            if self.group.has_member(&expense.paid_by_member_id) {
                rows.paid.push(PaidRow {
                    member_id: expense.paid_by_member_id.clone(),
                    amount: expense.amount.abs(),
                });
            }

            let mut owed_by_member: HashMap<&str, i64> = HashMap::new();
            let mut order = Vec::new();
            for share in &expense.shares {
                let entry = owed_by_member.entry(share.member_id.as_str()).or_insert_with(|| {
                    order.push(share.member_id.as_str());
                    0
                });
                *entry += to_cents(share.amount);
            }
            for member_id in order {
                let cents = owed_by_member.get(member_id).copied().unwrap_or_default();
                rows.owed.push(OwedRow {
                    member_id: member_id.to_string(),
                    amount: from_cents(cents),
                });
            }
        }

        for settlement in &self.settlements {
            rows.paid_settlements.push(PaidSettlementRow {
                payer_member_id: settlement.payer_member_id.clone(),
                amount: settlement.amount,
            });
            rows.received_settlements.push(ReceivedSettlementRow {
                receiver_member_id: settlement.receiver_member_id.clone(),
                amount: settlement.amount,
            });
        }

        rows
    }

    pub fn balances(&self) -> HashMap<String, MemberBalance> {
        compute_balances_from_rows(&self.balance_rows())
    }

    pub fn suggestions(&self) -> Vec<SettlementSuggestion> {
        suggest_settlements(&self.balances())
    }

    pub fn max_settlement_allowed(&self, payer_member_id: &str, receiver_member_id: &str) -> MaxSettlement {
        cap_settlement(
            self.has_expenses(),
            &self.suggestions(),
            &self.settlements,
            payer_member_id,
            receiver_member_id,
        )
    }
}
