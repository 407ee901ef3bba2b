mod guard_tests;
mod property_tests;

use std::collections::HashMap;

use chrono::Utc;

use crate::core::models::balance::{MemberBalance, OwedRow, PaidRow};
use crate::core::models::settlement::{Settlement, SettlementMethod, SettlementStatus};
use crate::core::services::SettleUpService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> SettleUpService<InMemoryLogging, InMemoryStorage> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    SettleUpService::new(storage, logging)
}

pub fn paid(member_id: &str, amount: f64) -> PaidRow {
    PaidRow {
        member_id: member_id.to_string(),
        amount,
    }
}

pub fn owed(member_id: &str, amount: f64) -> OwedRow {
    OwedRow {
        member_id: member_id.to_string(),
        amount,
    }
}

/// Builds a balance map straight from member totals.
pub fn balances_of(totals: &[(&str, f64)]) -> HashMap<String, MemberBalance> {
    totals
        .iter()
        .map(|(id, total)| {
            let balance = MemberBalance {
                member_id: id.to_string(),
                paid: 0.0,
                owed: 0.0,
                total: *total,
            };
            (id.to_string(), balance)
        })
        .collect()
}

pub fn completed_settlement(payer: &str, receiver: &str, amount: f64) -> Settlement {
    Settlement {
        id: uuid::Uuid::new_v4().to_string(),
        group_id: "group-1".to_string(),
        payer_member_id: payer.to_string(),
        receiver_member_id: receiver.to_string(),
        amount,
        method: SettlementMethod::Manual,
        status: SettlementStatus::Completed,
        created_at: Utc::now(),
    }
}
