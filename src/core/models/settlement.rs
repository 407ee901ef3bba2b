use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMethod {
    Manual,
    InPerson,
    Online,
}

impl SettlementMethod {
    /// Parses a client supplied method. Anything unrecognised is recorded as manual.
    pub fn parse_or_manual(method: Option<&str>) -> Self {
        match method.map(str::trim) {
            Some("in_person") => SettlementMethod::InPerson,
            Some("online") => SettlementMethod::Online,
            _ => SettlementMethod::Manual,
        }
    }
}

impl std::fmt::Display for SettlementMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SettlementMethod::Manual => "manual",
            SettlementMethod::InPerson => "in_person",
            SettlementMethod::Online => "online",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    Pending,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Settlement {
    pub id: String,
    pub group_id: String,
    pub payer_member_id: String,
    pub receiver_member_id: String,
    pub amount: f64,
    pub method: SettlementMethod,
    pub status: SettlementStatus,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Settlement {
    pub fn is_completed(&self) -> bool {
        self.status == SettlementStatus::Completed
    }
}
