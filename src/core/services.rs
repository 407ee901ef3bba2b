use crate::constants::{
    EXPENSE_ADDED, EXPENSE_REMOVED, GROUP_CREATED, MAX_AMOUNT, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
    MEMBER_ADDED, SETTLEMENT_RECORDED, SETTLEMENT_REJECTED, SETTLEMENTS_CLEARED, SPLIT_TOLERANCE,
};
use crate::core::errors::SettleUpError;
use crate::core::guard::clamp_to_cap;
use crate::core::ledger::GroupLedger;
use crate::core::models::{
    audit::{AppLog, GroupAudit},
    balance::{MaxSettlement, MemberBalance, SettlementSuggestion},
    expense::{Expense, Share},
    group::{Group, Member},
    settlement::{Settlement, SettlementMethod, SettlementStatus},
};
use crate::core::money::{from_cents, round2, to_cents};
use crate::core::suggestions::suggest_settlements;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct NewExpense {
    pub transaction_id: String,
    pub description: String,
    pub amount: f64,
    pub paid_by_member_id: String,
    pub shares: Vec<Share>,
}

#[derive(Clone, Debug)]
pub struct NewSettlement {
    pub group_id: String,
    pub payer_member_id: String,
    pub receiver_member_id: String,
    pub amount: f64,
    pub method: SettlementMethod,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct ExpenseActivity {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub paid_by_member_id: String,
    pub split_count: usize,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct GroupSummary {
    pub group: Group,
    pub is_owner: bool,
    /// Newest first.
    pub activity: Vec<ExpenseActivity>,
    /// One entry per member, zero for members without activity.
    pub balances: Vec<MemberBalance>,
    pub suggestions: Vec<SettlementSuggestion>,
    pub total_spend: f64,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct GroupBalanceSummary {
    pub id: String,
    pub name: String,
    pub member_count: usize,
    pub my_balance: f64,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub last_activity_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, PartialEq)]
pub struct FriendBalance {
    pub key: String,
    pub display_name: String,
    /// Positive when this person owes the user.
    pub balance: f64,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct UserSummary {
    pub groups: Vec<GroupBalanceSummary>,
    pub friends: Vec<FriendBalance>,
    pub total_owed_to_me: f64,
    pub total_i_owe: f64,
    pub net_balance: f64,
}

/// Someone the user shares at least one group with.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, PartialEq)]
pub struct Person {
    pub key: String,
    pub display_name: String,
    pub email: Option<String>,
    /// Group to split in with this person. Two-person groups win.
    pub group_id: String,
    pub group_name: String,
    pub member_id: String,
    pub member_count: usize,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, PartialEq)]
pub struct GroupSettlementSuggestion {
    pub group_id: String,
    pub from_member_id: String,
    pub to_member_id: String,
    pub amount: f64,
}

/// One expense seen from the user's side of a pair.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct PersonActivity {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub group_id: String,
    pub group_name: String,
    pub paid_by_me: bool,
    pub paid_by_them: bool,
    pub my_share: f64,
    pub their_share: f64,
    /// Positive when the expense made them owe me more.
    pub effect_on_balance: f64,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct PersonDetail {
    pub key: String,
    pub display_name: String,
    pub email: Option<String>,
    /// Positive when this person owes the user, summed over shared groups.
    pub balance: f64,
    /// Newest first.
    pub activity: Vec<PersonActivity>,
    /// Current suggestions between the two of them, per shared group.
    pub settlements: Vec<GroupSettlementSuggestion>,
}

pub struct SettleUpService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
}

impl<L: LoggingService, S: Storage> SettleUpService<L, S> {
    pub fn new(storage: S, logging: L) -> Self {
        info!("Initializing SettleUpService");
        SettleUpService { storage, logging }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn find_group(&self, group_id: &str) -> Result<Group, SettleUpError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| SettleUpError::GroupNotFound(group_id.to_string()))
    }

    async fn validate_group_access(&self, group_id: &str, user_id: &str) -> Result<Group, SettleUpError> {
        let group = self.find_group(group_id).await?;
        if !group.can_access(user_id) {
            warn!("User {} attempted to access group {}", user_id, group_id);
            return Err(SettleUpError::NotGroupMember(user_id.to_string()));
        }
        Ok(group)
    }

    async fn validate_group_owner(&self, group_id: &str, user_id: &str) -> Result<Group, SettleUpError> {
        let group = self.find_group(group_id).await?;
        if !group.is_owner(user_id) {
            warn!("User {} is not the owner of group {}", user_id, group_id);
            return Err(SettleUpError::NotGroupOwner(user_id.to_string()));
        }
        Ok(group)
    }

    async fn load_ledger(&self, group: Group) -> Result<GroupLedger, SettleUpError> {
        let expenses = self.storage.get_expenses(&group.id).await?;
        let settlements = self.storage.get_completed_settlements(&group.id).await?;
        Ok(GroupLedger::new(group, expenses, settlements))
    }

    async fn log_and_audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), SettleUpError> {
        self.logging.log_action(action, log_details.clone(), user_id).await?;
        if let Some(gid) = group_id {
            self.storage
                .save_group_audit(GroupAudit {
                    id: Uuid::new_v4().to_string(),
                    group_id: gid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details: log_details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), SettleUpError> {
        if value.trim().is_empty() {
            return Err(SettleUpError::invalid_input(
                field,
                &format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.len() > max_length {
            return Err(SettleUpError::invalid_input(
                field,
                &format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(SettleUpError::invalid_input(
                field,
                &format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<f64, SettleUpError> {
        if !amount.is_finite() {
            return Err(SettleUpError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number",
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(SettleUpError::invalid_input(
                field,
                "Amount Too Large",
                "Amount cannot exceed 1,000,000",
            ));
        }
        let rounded = round2(amount);
        if rounded <= 0.0 {
            return Err(SettleUpError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be greater than 0",
            ));
        }
        Ok(rounded)
    }

    // GROUPS

    pub async fn create_group(
        &self,
        name: String,
        created_by: &str,
        display_name: String,
        email: Option<String>,
    ) -> Result<Group, SettleUpError> {
        info!("Creating group '{}' for user {}", name, created_by);
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        self.validate_string_input("created_by", created_by, MAX_NAME_LENGTH)?;
        self.validate_string_input("display_name", &display_name, MAX_NAME_LENGTH)?;

        let owner = Member {
            id: Uuid::new_v4().to_string(),
            user_id: Some(created_by.to_string()),
            email,
            display_name: display_name.trim().to_string(),
        };
        let group = Group {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            owner_id: created_by.to_string(),
            members: vec![owner],
            created_at: Utc::now(),
        };
        self.storage.save_group(group.clone()).await?;

        self.log_and_audit(
            Some(&group.id),
            GROUP_CREATED,
            json!({ "group_id": group.id, "name": group.name }),
            Some(created_by),
        )
        .await?;
        debug!("Group created with ID: {}", group.id);
        Ok(group)
    }

    pub async fn add_member(
        &self,
        group_id: &str,
        display_name: String,
        user_id: Option<String>,
        email: Option<String>,
        added_by: &str,
    ) -> Result<Member, SettleUpError> {
        let mut group = self.validate_group_owner(group_id, added_by).await?;
        self.validate_string_input("display_name", &display_name, MAX_NAME_LENGTH)?;

        if let Some(ref uid) = user_id {
            if group.member_for_user(uid).is_some() {
                return Err(SettleUpError::AlreadyGroupMember(uid.clone()));
            }
        }

        let member = Member {
            id: Uuid::new_v4().to_string(),
            user_id,
            email: email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
            display_name: display_name.trim().to_string(),
        };
        group.members.push(member.clone());
        self.storage.save_group(group).await?;

        self.log_and_audit(
            Some(group_id),
            MEMBER_ADDED,
            json!({ "group_id": group_id, "member_id": member.id, "display_name": member.display_name }),
            Some(added_by),
        )
        .await?;
        Ok(member)
    }

    pub async fn group_summary(&self, group_id: &str, queried_by: &str) -> Result<GroupSummary, SettleUpError> {
        let group = self.validate_group_access(group_id, queried_by).await?;
        let is_owner = group.is_owner(queried_by);
        let ledger = self.load_ledger(group).await?;

        if !ledger.has_expenses() {
            let balances = ledger.group.members.iter().map(|m| MemberBalance::zero(&m.id)).collect();
            return Ok(GroupSummary {
                group: ledger.group,
                is_owner,
                activity: Vec::new(),
                balances,
                suggestions: Vec::new(),
                total_spend: 0.0,
            });
        }

        let mut computed = ledger.balances();
        let mut balances: Vec<MemberBalance> = ledger
            .group
            .members
            .iter()
            .map(|m| computed.remove(&m.id).unwrap_or_else(|| MemberBalance::zero(&m.id)))
            .collect();
        let mut departed: Vec<MemberBalance> = computed.into_values().collect();
        departed.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        balances.extend(departed);

        let activity = ledger
            .expenses()
            .iter()
            .rev()
            .map(|e| ExpenseActivity {
                id: e.id.clone(),
                description: e.description.clone(),
                amount: e.amount.abs(),
                paid_by_member_id: e.paid_by_member_id.clone(),
                split_count: e.shares.len(),
                created_at: e.created_at,
            })
            .collect();

        Ok(GroupSummary {
            is_owner,
            activity,
            balances,
            suggestions: ledger.suggestions(),
            total_spend: ledger.total_spend(),
            group: ledger.group,
        })
    }

    // EXPENSES

    pub async fn add_expense(
        &self,
        group_id: &str,
        new_expense: NewExpense,
        created_by: &str,
    ) -> Result<Expense, SettleUpError> {
        info!(
            "Adding expense for transaction {} to group {} by user {}",
            new_expense.transaction_id, group_id, created_by
        );
        let group = self.validate_group_access(group_id, created_by).await?;
        self.validate_string_input("transaction_id", &new_expense.transaction_id, MAX_NAME_LENGTH)?;
        self.validate_string_input("description", &new_expense.description, MAX_DESCRIPTION_LENGTH)?;
        let amount = self.validate_amount_input("amount", new_expense.amount.abs())?;

        if !group.has_member(&new_expense.paid_by_member_id) {
            return Err(SettleUpError::MemberNotFound(new_expense.paid_by_member_id));
        }
        let shares: Vec<Share> = new_expense
            .shares
            .into_iter()
            .filter(|s| s.amount.is_finite())
            .map(|s| Share {
                amount: round2(s.amount),
                member_id: s.member_id,
            })
            .filter(|s| s.amount > 0.0)
            .collect();
        if shares.is_empty() {
            return Err(SettleUpError::InvalidSplit(amount));
        }
        if let Some(stranger) = shares.iter().find(|s| !group.has_member(&s.member_id)) {
            return Err(SettleUpError::MemberNotFound(stranger.member_id.clone()));
        }
        let share_sum: i64 = shares.iter().map(|s| to_cents(s.amount)).sum();
        if (share_sum - to_cents(amount)).abs() > to_cents(SPLIT_TOLERANCE) {
            warn!("Shares sum {} does not match amount {}", from_cents(share_sum), amount);
            return Err(SettleUpError::InvalidSplit(amount));
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            transaction_id: new_expense.transaction_id,
            description: new_expense.description.trim().to_string(),
            amount,
            paid_by_member_id: new_expense.paid_by_member_id,
            shares,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        };
        {
            let _lock = self.storage.lock_group_settlements(group_id).await?;
            if self
                .storage
                .find_expense_by_transaction(group_id, &expense.transaction_id)
                .await?
                .is_some()
            {
                warn!(
                    "Transaction {} already split into group {}",
                    expense.transaction_id, group_id
                );
                return Err(SettleUpError::DuplicateExpense(expense.transaction_id));
            }
            self.storage.save_expense(expense.clone()).await?;
        }

        self.log_and_audit(
            Some(group_id),
            EXPENSE_ADDED,
            json!({
                "expense_id": expense.id,
                "transaction_id": expense.transaction_id,
                "amount": expense.amount,
                "paid_by_member_id": expense.paid_by_member_id
            }),
            Some(created_by),
        )
        .await?;
        Ok(expense)
    }

    /// Removes an expense. Removing the last expense of a group also clears
    /// its settlements, since they no longer settle anything.
    pub async fn remove_expense(&self, expense_id: &str, removed_by: &str) -> Result<(), SettleUpError> {
        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| SettleUpError::ExpenseNotFound(expense_id.to_string()))?;
        self.validate_group_access(&expense.group_id, removed_by).await?;

        let cleared = {
            let _lock = self.storage.lock_group_settlements(&expense.group_id).await?;
            self.storage.delete_expense(expense_id).await?;
            if self.storage.get_expenses(&expense.group_id).await?.is_empty() {
                self.storage.clear_settlements(&expense.group_id).await?
            } else {
                0
            }
        };

        self.log_and_audit(
            Some(&expense.group_id),
            EXPENSE_REMOVED,
            json!({ "expense_id": expense_id, "cleared_settlements": cleared }),
            Some(removed_by),
        )
        .await?;
        Ok(())
    }

    // SETTLEMENTS

    pub async fn max_settlement_allowed(
        &self,
        group_id: &str,
        payer_member_id: &str,
        receiver_member_id: &str,
        queried_by: &str,
    ) -> Result<MaxSettlement, SettleUpError> {
        let group = self.validate_group_access(group_id, queried_by).await?;
        let ledger = self.load_ledger(group).await?;
        Ok(ledger.max_settlement_allowed(payer_member_id, receiver_member_id))
    }

    /// Records a completed settlement, capped by the guard. The guard runs
    /// again under the group's settlement lock so duplicate requests cannot
    /// both write.
    pub async fn record_settlement(
        &self,
        request: NewSettlement,
        recorded_by: &str,
    ) -> Result<Settlement, SettleUpError> {
        info!(
            "Recording settlement {} -> {} of {} in group {}",
            request.payer_member_id, request.receiver_member_id, request.amount, request.group_id
        );
        if !request.amount.is_finite() || round2(request.amount) <= 0.0 {
            return Err(SettleUpError::InvalidSettlementAmount);
        }
        if request.payer_member_id == request.receiver_member_id {
            return Err(SettleUpError::SelfSettlement);
        }
        let group = self.validate_group_access(&request.group_id, recorded_by).await?;
        for member_id in [&request.payer_member_id, &request.receiver_member_id] {
            if !group.has_member(member_id) {
                return Err(SettleUpError::MemberNotFound(member_id.clone()));
            }
        }

        let _lock = self.storage.lock_group_settlements(&group.id).await?;
        let ledger = self.load_ledger(group).await?;
        let cap = ledger.max_settlement_allowed(&request.payer_member_id, &request.receiver_member_id);

        let Some(amount) = clamp_to_cap(request.amount, &cap) else {
            let reason = cap.reason;
            self.logging
                .log_action(
                    SETTLEMENT_REJECTED,
                    json!({
                        "group_id": request.group_id,
                        "payer_member_id": request.payer_member_id,
                        "receiver_member_id": request.receiver_member_id,
                        "requested": request.amount,
                        "reason": reason
                    }),
                    Some(recorded_by),
                )
                .await?;
            return Err(match reason {
                Some(reason) => {
                    warn!("Settlement rejected in group {}: {}", request.group_id, reason);
                    SettleUpError::SettlementNotAllowed(reason)
                }
                None => SettleUpError::InvalidSettlementAmount,
            });
        };

        let settlement = Settlement {
            id: Uuid::new_v4().to_string(),
            group_id: request.group_id.clone(),
            payer_member_id: request.payer_member_id,
            receiver_member_id: request.receiver_member_id,
            amount,
            method: request.method,
            status: SettlementStatus::Completed,
            created_at: Utc::now(),
        };
        self.storage.save_settlement(settlement.clone()).await?;

        self.log_and_audit(
            Some(&settlement.group_id),
            SETTLEMENT_RECORDED,
            json!({
                "settlement_id": settlement.id,
                "payer_member_id": settlement.payer_member_id,
                "receiver_member_id": settlement.receiver_member_id,
                "requested": request.amount,
                "amount": settlement.amount,
                "method": settlement.method.to_string()
            }),
            Some(recorded_by),
        )
        .await?;
        Ok(settlement)
    }

    /// Drops every settlement of a group. Owner only; used to recover from
    /// settlements recorded in error.
    pub async fn clear_settlements(&self, group_id: &str, cleared_by: &str) -> Result<usize, SettleUpError> {
        self.validate_group_owner(group_id, cleared_by).await?;
        let cleared = {
            let _lock = self.storage.lock_group_settlements(group_id).await?;
            self.storage.clear_settlements(group_id).await?
        };
        self.log_and_audit(
            Some(group_id),
            SETTLEMENTS_CLEARED,
            json!({ "group_id": group_id, "cleared": cleared }),
            Some(cleared_by),
        )
        .await?;
        Ok(cleared)
    }

    // SUMMARIES

    pub async fn user_summary(&self, user_id: &str) -> Result<UserSummary, SettleUpError> {
        let groups = self.storage.get_user_groups(user_id).await?;
        let ledgers = futures::future::try_join_all(groups.into_iter().map(|g| self.load_ledger(g))).await?;

        let mut owed_to_me = 0i64;
        let mut i_owe = 0i64;
        let mut friends: HashMap<String, (String, i64)> = HashMap::new();
        let mut group_summaries = Vec::with_capacity(ledgers.len());

        for ledger in &ledgers {
            let group = &ledger.group;
            let last_activity_at = ledger
                .expenses()
                .iter()
                .map(|e| e.created_at)
                .max()
                .unwrap_or(group.created_at);

            let mut my_balance = 0i64;
            if ledger.has_expenses() {
                let balances = ledger.balances();
                let cents_of = |member_id: &str| balances.get(member_id).map(|b| to_cents(b.total)).unwrap_or(0);

                if let Some(me) = group.member_for_user(user_id) {
                    my_balance = cents_of(&me.id);
                }
                for member in group.members.iter().filter(|m| m.user_id.as_deref() != Some(user_id)) {
                    let entry = friends
                        .entry(member.person_key(&group.id))
                        .or_insert_with(|| (member.display_name.clone(), 0));
                    entry.1 -= cents_of(&member.id);
                }
            }

            if my_balance > 0 {
                owed_to_me += my_balance;
            } else {
                i_owe -= my_balance;
            }
            group_summaries.push(GroupBalanceSummary {
                id: group.id.clone(),
                name: group.name.clone(),
                member_count: group.members.len(),
                my_balance: from_cents(my_balance),
                last_activity_at,
            });
        }

        let mut friends: Vec<FriendBalance> = friends
            .into_iter()
            .map(|(key, (display_name, cents))| FriendBalance {
                key,
                display_name,
                balance: from_cents(cents),
            })
            .collect();
        friends.sort_by(|a, b| a.display_name.cmp(&b.display_name).then_with(|| a.key.cmp(&b.key)));

        Ok(UserSummary {
            groups: group_summaries,
            friends,
            total_owed_to_me: from_cents(owed_to_me),
            total_i_owe: from_cents(i_owe),
            net_balance: from_cents(owed_to_me - i_owe),
        })
    }

    pub async fn list_people(&self, user_id: &str) -> Result<Vec<Person>, SettleUpError> {
        let groups = self.storage.get_user_groups(user_id).await?;
        let mut people: HashMap<String, Person> = HashMap::new();

        for group in &groups {
            let member_count = group.members.len();
            for member in group.members.iter().filter(|m| m.user_id.as_deref() != Some(user_id)) {
                let key = member.person_key(&group.id);
                let replace = match people.get(&key) {
                    None => true,
                    Some(existing) => member_count == 2 && existing.member_count > 2,
                };
                if replace {
                    people.insert(
                        key.clone(),
                        Person {
                            key,
                            display_name: member.display_name.clone(),
                            email: member.email.clone(),
                            group_id: group.id.clone(),
                            group_name: group.name.clone(),
                            member_id: member.id.clone(),
                            member_count,
                        },
                    );
                }
            }
        }

        let mut people: Vec<Person> = people.into_values().collect();
        people.sort_by(|a, b| a.display_name.cmp(&b.display_name).then_with(|| a.key.cmp(&b.key)));
        Ok(people)
    }

    /// Balance, open suggestions and shared expenses between the user and the
    /// person behind `key` (see [`Member::person_key`]), across shared groups.
    pub async fn person_detail(&self, user_id: &str, key: &str) -> Result<PersonDetail, SettleUpError> {
        self.validate_string_input("key", key, MAX_DESCRIPTION_LENGTH)?;
        let is_them = |group: &Group, member: &Member| {
            member.user_id.as_deref() != Some(user_id) && member.person_key(&group.id) == key
        };

        let shared: Vec<Group> = self
            .storage
            .get_user_groups(user_id)
            .await?
            .into_iter()
            .filter(|g| g.members.iter().any(|m| is_them(g, m)))
            .collect();
        let person = shared
            .iter()
            .find_map(|g| g.members.iter().find(|m| is_them(g, m)))
            .cloned()
            .ok_or_else(|| SettleUpError::PersonNotFound(key.to_string()))?;
        let ledgers = futures::future::try_join_all(shared.into_iter().map(|g| self.load_ledger(g))).await?;

        let mut balance = 0i64;
        let mut settlements = Vec::new();
        let mut activity = Vec::new();

        for ledger in ledgers.iter().filter(|l| l.has_expenses()) {
            let group = &ledger.group;
            let (Some(me), Some(them)) = (
                group.member_for_user(user_id),
                group.members.iter().find(|m| is_them(group, m)),
            ) else {
                continue;
            };

            let balances = ledger.balances();
            balance -= balances.get(&them.id).map(|b| to_cents(b.total)).unwrap_or(0);

            settlements.extend(
                suggest_settlements(&balances)
                    .into_iter()
                    .filter(|s| {
                        (s.from_member_id == me.id && s.to_member_id == them.id)
                            || (s.from_member_id == them.id && s.to_member_id == me.id)
                    })
                    .map(|s| GroupSettlementSuggestion {
                        group_id: group.id.clone(),
                        from_member_id: s.from_member_id,
                        to_member_id: s.to_member_id,
                        amount: s.amount,
                    }),
            );

            for expense in ledger.expenses() {
                let share_of = |member_id: &str| -> i64 {
                    expense
                        .shares
                        .iter()
                        .filter(|s| s.member_id == member_id)
                        .map(|s| to_cents(s.amount))
                        .sum()
                };
                let my_share = share_of(&me.id);
                let their_share = share_of(&them.id);
                let paid_by_me = expense.paid_by_member_id == me.id;
                let paid_by_them = expense.paid_by_member_id == them.id;
                let effect = if paid_by_me {
                    their_share
                } else if paid_by_them {
                    -my_share
                } else {
                    0
                };
                activity.push(PersonActivity {
                    id: expense.id.clone(),
                    description: expense.description.clone(),
                    amount: expense.amount.abs(),
                    group_id: group.id.clone(),
                    group_name: group.name.clone(),
                    paid_by_me,
                    paid_by_them,
                    my_share: from_cents(my_share),
                    their_share: from_cents(their_share),
                    effect_on_balance: from_cents(effect),
                    created_at: expense.created_at,
                });
            }
        }
        activity.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        debug!("Person {} shares {} expenses with user {}", key, activity.len(), user_id);

        Ok(PersonDetail {
            key: key.to_string(),
            display_name: person.display_name,
            email: person.email,
            balance: from_cents(balance),
            activity,
            settlements,
        })
    }

    // AUDIT

    pub async fn get_group_audits(&self, group_id: &str, queried_by: &str) -> Result<Vec<GroupAudit>, SettleUpError> {
        self.validate_group_access(group_id, queried_by).await?;
        self.storage.get_group_audits(group_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, SettleUpError> {
        self.logging.get_logs().await
    }
}
