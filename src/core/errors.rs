use serde::Serialize;
use thiserror::Error;

use crate::core::models::balance::DenialReason;

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum SettleUpError {
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("Member {0} not found")]
    MemberNotFound(String),
    #[error("User {0} is already a group member")]
    AlreadyGroupMember(String),
    #[error("User {0} cannot access this group")]
    NotGroupMember(String),
    #[error("User {0} is not group owner")]
    NotGroupOwner(String),
    #[error("No one matching {0} shares a group with you")]
    PersonNotFound(String),
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),
    #[error("Transaction {0} is already in this group")]
    DuplicateExpense(String),
    #[error("Shares must sum to {0:.2}")]
    InvalidSplit(f64),
    #[error("Cannot create settlement to self")]
    SelfSettlement,
    #[error("Invalid settlement amount")]
    InvalidSettlementAmount,
    #[error("{0}")]
    SettlementNotAllowed(DenialReason),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
}

impl SettleUpError {
    pub fn invalid_input(field: &str, title: &str, description: impl Into<String>) -> Self {
        SettleUpError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.to_string(),
                description: description.into(),
            },
        )
    }
}
