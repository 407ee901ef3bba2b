use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::SettleUpError;
use crate::core::models::expense::Share;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub created_by_id: String,
    /// Display name of the creator's own member entry.
    pub display_name: String,
    pub email: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub display_name: String,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub added_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ShareRequest {
    pub member_id: String,
    pub amount: f64,
}

impl From<ShareRequest> for Share {
    fn from(share: ShareRequest) -> Self {
        Share {
            member_id: share.member_id,
            amount: share.amount,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub group_id: String,
    pub transaction_id: String,
    pub description: String,
    pub amount: f64,
    pub paid_by_member_id: String,
    pub shares: Vec<ShareRequest>,
    pub created_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveExpenseRequest {
    pub removed_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RecordSettlementRequest {
    pub group_id: String,
    pub payer_member_id: String,
    pub receiver_member_id: String,
    pub amount: f64,
    /// `manual`, `in_person` or `online`; anything else is recorded as `manual`.
    pub method: Option<String>,
    pub recorded_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct MaxSettlementRequest {
    pub group_id: String,
    pub payer_member_id: String,
    pub receiver_member_id: String,
    pub queried_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ClearSettlementsRequest {
    pub cleared_by_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct ClearSettlementsResponse {
    pub cleared: usize,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequesterQuery {
    /// Account making the request.
    pub user_id: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for SettleUpError to implement IntoResponse
pub struct ApiError(pub SettleUpError);

impl From<SettleUpError> for ApiError {
    fn from(err: SettleUpError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            SettleUpError::GroupNotFound(_)
            | SettleUpError::MemberNotFound(_)
            | SettleUpError::PersonNotFound(_)
            | SettleUpError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
            SettleUpError::NotGroupMember(_) | SettleUpError::NotGroupOwner(_) => StatusCode::FORBIDDEN,
            SettleUpError::AlreadyGroupMember(_) | SettleUpError::DuplicateExpense(_) => StatusCode::CONFLICT,
            SettleUpError::InvalidSplit(_)
            | SettleUpError::SelfSettlement
            | SettleUpError::InvalidSettlementAmount
            | SettleUpError::SettlementNotAllowed(_)
            | SettleUpError::InvalidInput(..) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = match self.0 {
            SettleUpError::InvalidInput(_, detail) => format!("{}: {}", detail.title, detail.description),
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
