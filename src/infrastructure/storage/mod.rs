use crate::core::errors::SettleUpError;
use crate::core::models::{audit::GroupAudit, expense::Expense, group::Group, settlement::Settlement};
use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

/// Held while a settlement is validated and written for one group.
pub type SettlementLock = OwnedMutexGuard<()>;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), SettleUpError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, SettleUpError>;
    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, SettleUpError>;

    async fn save_expense(&self, expense: Expense) -> Result<(), SettleUpError>;
    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, SettleUpError>;
    /// Expenses of a group, oldest first.
    async fn get_expenses(&self, group_id: &str) -> Result<Vec<Expense>, SettleUpError>;
    async fn find_expense_by_transaction(
        &self,
        group_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Expense>, SettleUpError>;
    async fn delete_expense(&self, expense_id: &str) -> Result<(), SettleUpError>;

    async fn save_settlement(&self, settlement: Settlement) -> Result<(), SettleUpError>;
    /// Completed settlements of a group, oldest first.
    async fn get_completed_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, SettleUpError>;
    async fn clear_settlements(&self, group_id: &str) -> Result<usize, SettleUpError>;
    /// Serialises ledger writes per group. Guard checks, duplicate checks and
    /// the write that follows them must happen while the returned lock is held.
    async fn lock_group_settlements(&self, group_id: &str) -> Result<SettlementLock, SettleUpError>;

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), SettleUpError>;
    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, SettleUpError>;
}

pub mod in_memory;
