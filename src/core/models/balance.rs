use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Money a member put forward for one expense.
#[derive(Clone, Debug, PartialEq)]
pub struct PaidRow {
    pub member_id: String,
    pub amount: f64,
}

/// One member's share of one expense.
#[derive(Clone, Debug, PartialEq)]
pub struct OwedRow {
    pub member_id: String,
    pub amount: f64,
}

/// A completed settlement seen from the payer's side.
#[derive(Clone, Debug, PartialEq)]
pub struct PaidSettlementRow {
    pub payer_member_id: String,
    pub amount: f64,
}

/// A completed settlement seen from the receiver's side.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceivedSettlementRow {
    pub receiver_member_id: String,
    pub amount: f64,
}

/// The four raw row kinds the aggregator folds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceRows {
    pub paid: Vec<PaidRow>,
    pub owed: Vec<OwedRow>,
    pub paid_settlements: Vec<PaidSettlementRow>,
    pub received_settlements: Vec<ReceivedSettlementRow>,
}

/// Net position of one member. Positive `total` means the group owes the member.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MemberBalance {
    pub member_id: String,
    pub paid: f64,
    pub owed: f64,
    pub total: f64,
}

impl MemberBalance {
    pub fn zero(member_id: &str) -> Self {
        MemberBalance {
            member_id: member_id.to_string(),
            paid: 0.0,
            owed: 0.0,
            total: 0.0,
        }
    }
}

/// `from_member_id` should pay `to_member_id` the given amount.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SettlementSuggestion {
    pub from_member_id: String,
    pub to_member_id: String,
    pub amount: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    NoExpenses,
    NothingOwedBetweenMembers,
    AlreadySettled,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DenialReason::NoExpenses => "No expenses in this group",
            DenialReason::NothingOwedBetweenMembers => "Already settled between these members",
            DenialReason::AlreadySettled => "Already settled",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of the settlement guard for one ordered (payer, receiver) pair.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MaxSettlement {
    pub max_amount: f64,
    pub allowed: bool,
    pub reason: Option<DenialReason>,
}

impl MaxSettlement {
    pub fn allowed(max_amount: f64) -> Self {
        MaxSettlement {
            max_amount,
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: DenialReason) -> Self {
        MaxSettlement {
            max_amount: 0.0,
            allowed: false,
            reason: Some(reason),
        }
    }
}
