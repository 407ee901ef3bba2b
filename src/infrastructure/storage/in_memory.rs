use crate::core::errors::SettleUpError;
use crate::core::models::{audit::GroupAudit, expense::Expense, group::Group, settlement::Settlement};
use crate::infrastructure::storage::{SettlementLock, Storage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    groups: Arc<RwLock<HashMap<String, Group>>>,
    expenses: Arc<RwLock<HashMap<String, Expense>>>,
    settlements: Arc<RwLock<HashMap<String, Settlement>>>,
    settlement_locks: Arc<RwLock<HashMap<String, Arc<Mutex<()>>>>>,
    group_audits: Arc<RwLock<HashMap<String, Vec<GroupAudit>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_group(&self, group: Group) -> Result<(), SettleUpError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, SettleUpError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, SettleUpError> {
        let groups = self.groups.read().await;
        let mut accessible: Vec<Group> = groups.values().filter(|g| g.can_access(user_id)).cloned().collect();
        accessible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(accessible)
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), SettleUpError> {
        let mut expenses = self.expenses.write().await;
        expenses.insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, SettleUpError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.get(expense_id).cloned())
    }

    async fn get_expenses(&self, group_id: &str) -> Result<Vec<Expense>, SettleUpError> {
        let expenses = self.expenses.read().await;
        let mut group_expenses: Vec<Expense> = expenses
            .values()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        group_expenses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(group_expenses)
    }

    async fn find_expense_by_transaction(
        &self,
        group_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Expense>, SettleUpError> {
        let expenses = self.expenses.read().await;
        Ok(expenses
            .values()
            .find(|e| e.group_id == group_id && e.transaction_id == transaction_id)
            .cloned())
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<(), SettleUpError> {
        let mut expenses = self.expenses.write().await;
        expenses
            .remove(expense_id)
            .map(|_| ())
            .ok_or_else(|| SettleUpError::ExpenseNotFound(expense_id.to_string()))
    }

    async fn save_settlement(&self, settlement: Settlement) -> Result<(), SettleUpError> {
        let mut settlements = self.settlements.write().await;
        settlements.insert(settlement.id.clone(), settlement);
        Ok(())
    }

    async fn get_completed_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, SettleUpError> {
        let settlements = self.settlements.read().await;
        let mut completed: Vec<Settlement> = settlements
            .values()
            .filter(|s| s.group_id == group_id && s.is_completed())
            .cloned()
            .collect();
        completed.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(completed)
    }

    async fn clear_settlements(&self, group_id: &str) -> Result<usize, SettleUpError> {
        let mut settlements = self.settlements.write().await;
        let before = settlements.len();
        settlements.retain(|_, s| s.group_id != group_id);
        Ok(before - settlements.len())
    }

    async fn lock_group_settlements(&self, group_id: &str) -> Result<SettlementLock, SettleUpError> {
        let lock = {
            let mut locks = self.settlement_locks.write().await;
            locks
                .entry(group_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        Ok(lock.lock_owned().await)
    }

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), SettleUpError> {
        let mut group_audits = self.group_audits.write().await;
        group_audits
            .entry(audit.group_id.clone())
            .or_insert_with(Vec::new)
            .push(audit);
        Ok(())
    }

    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, SettleUpError> {
        let group_audits = self.group_audits.read().await;
        Ok(group_audits.get(group_id).cloned().unwrap_or_default())
    }
}
