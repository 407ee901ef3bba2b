use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Share {
    pub member_id: String,
    pub amount: f64,
}

/// A bank transaction split across the members of a group.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    /// Source bank transaction. A transaction is split into a group at most once.
    pub transaction_id: String,
    pub description: String,
    /// Absolute amount fronted by `paid_by_member_id`.
    pub amount: f64,
    pub paid_by_member_id: String,
    pub shares: Vec<Share>,
    pub created_by: String,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
