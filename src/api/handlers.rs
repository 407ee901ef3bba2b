use crate::{
    api::models::*,
    core::{
        models::{
            audit::{AppLog, GroupAudit},
            balance::MaxSettlement,
            expense::Expense,
            group::{Group, Member},
            settlement::{Settlement, SettlementMethod},
        },
        services::{GroupSummary, NewExpense, NewSettlement, Person, PersonDetail, SettleUpService, UserSummary},
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use std::sync::Arc;

pub type AppService = Arc<SettleUpService<InMemoryLogging, InMemoryStorage>>;

// Define API routes
pub fn api_routes(service: AppService) -> Router {
    Router::new()
        .route("/groups", post(create_group))
        .route("/groups/{group_id}", get(get_group_summary))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/groups/{group_id}/settlements", delete(clear_settlements))
        .route("/groups/{group_id}/audits", get(get_group_audits))
        .route("/expenses", post(add_expense))
        .route("/expenses/{expense_id}", delete(remove_expense))
        .route("/settlements", post(record_settlement))
        .route("/settlements/max", post(max_settlement_allowed))
        .route("/users/{user_id}/summary", get(get_user_summary))
        .route("/users/{user_id}/people", get(list_people))
        .route("/users/{user_id}/people/{key}", get(get_person_detail))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created successfully", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<AppService>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .create_group(req.name, &req.created_by_id, req.display_name, req.email)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        RequesterQuery
    ),
    responses(
        (status = 200, description = "Balances and suggested settlements", body = GroupSummary),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group_summary(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Query(query): Query<RequesterQuery>,
) -> Result<Json<GroupSummary>, ApiError> {
    let summary = service.group_summary(&group_id, &query.user_id).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    params(("group_id" = String, Path, description = "ID of the group")),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Member added", body = Member),
        (status = 403, description = "Not group owner", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Already a member", body = ErrorResponse)
    )
)]
pub async fn add_member(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<Member>, ApiError> {
    let member = service
        .add_member(&group_id, req.display_name, req.user_id, req.email, &req.added_by_id)
        .await?;
    Ok(Json(member))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = AddExpenseRequest,
    responses(
        (status = 200, description = "Expense added", body = Expense),
        (status = 400, description = "Shares do not add up", body = ErrorResponse),
        (status = 404, description = "Group or member not found", body = ErrorResponse),
        (status = 409, description = "Transaction already in group", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<AppService>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let new_expense = NewExpense {
        transaction_id: req.transaction_id,
        description: req.description,
        amount: req.amount,
        paid_by_member_id: req.paid_by_member_id,
        shares: req.shares.into_iter().map(Into::into).collect(),
    };
    let expense = service
        .add_expense(&req.group_id, new_expense, &req.created_by_id)
        .await?;
    Ok(Json(expense))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{expense_id}",
    params(("expense_id" = String, Path, description = "ID of the expense")),
    request_body = RemoveExpenseRequest,
    responses(
        (status = 200, description = "Expense removed"),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub async fn remove_expense(
    State(service): State<AppService>,
    Path(expense_id): Path<String>,
    Json(req): Json<RemoveExpenseRequest>,
) -> Result<StatusCode, ApiError> {
    service.remove_expense(&expense_id, &req.removed_by_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/settlements",
    request_body = RecordSettlementRequest,
    responses(
        (status = 200, description = "Settlement recorded, amount capped to what is still owed", body = Settlement),
        (status = 400, description = "Nothing left to settle", body = ErrorResponse),
        (status = 404, description = "Group or member not found", body = ErrorResponse)
    )
)]
pub async fn record_settlement(
    State(service): State<AppService>,
    Json(req): Json<RecordSettlementRequest>,
) -> Result<Json<Settlement>, ApiError> {
    let request = NewSettlement {
        group_id: req.group_id,
        payer_member_id: req.payer_member_id,
        receiver_member_id: req.receiver_member_id,
        amount: req.amount,
        method: SettlementMethod::parse_or_manual(req.method.as_deref()),
    };
    let settlement = service.record_settlement(request, &req.recorded_by_id).await?;
    Ok(Json(settlement))
}

#[utoipa::path(
    post,
    path = "/api/settlements/max",
    request_body = MaxSettlementRequest,
    responses(
        (status = 200, description = "Largest settlement currently allowed for the pair", body = MaxSettlement),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn max_settlement_allowed(
    State(service): State<AppService>,
    Json(req): Json<MaxSettlementRequest>,
) -> Result<Json<MaxSettlement>, ApiError> {
    let cap = service
        .max_settlement_allowed(
            &req.group_id,
            &req.payer_member_id,
            &req.receiver_member_id,
            &req.queried_by_id,
        )
        .await?;
    Ok(Json(cap))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}/settlements",
    params(("group_id" = String, Path, description = "ID of the group")),
    request_body = ClearSettlementsRequest,
    responses(
        (status = 200, description = "Settlements cleared", body = ClearSettlementsResponse),
        (status = 403, description = "Not group owner", body = ErrorResponse)
    )
)]
pub async fn clear_settlements(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<ClearSettlementsRequest>,
) -> Result<Json<ClearSettlementsResponse>, ApiError> {
    let cleared = service.clear_settlements(&group_id, &req.cleared_by_id).await?;
    Ok(Json(ClearSettlementsResponse { cleared }))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/summary",
    params(("user_id" = String, Path, description = "Account to summarise")),
    responses(
        (status = 200, description = "Balances across every accessible group", body = UserSummary)
    )
)]
pub async fn get_user_summary(
    State(service): State<AppService>,
    Path(user_id): Path<String>,
) -> Result<Json<UserSummary>, ApiError> {
    let summary = service.user_summary(&user_id).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/people",
    params(("user_id" = String, Path, description = "Account whose people to list")),
    responses(
        (status = 200, description = "People sharing a group with the user", body = Vec<Person>)
    )
)]
pub async fn list_people(
    State(service): State<AppService>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let people = service.list_people(&user_id).await?;
    Ok(Json(people))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/people/{key}",
    params(
        ("user_id" = String, Path, description = "Account asking"),
        ("key" = String, Path, description = "Person key: user id, email or group-member id")
    ),
    responses(
        (status = 200, description = "Balance and shared activity with one person", body = PersonDetail),
        (status = 404, description = "No such person in the user's groups", body = ErrorResponse)
    )
)]
pub async fn get_person_detail(
    State(service): State<AppService>,
    Path((user_id, key)): Path<(String, String)>,
) -> Result<Json<PersonDetail>, ApiError> {
    let detail = service.person_detail(&user_id, &key).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/audits",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        RequesterQuery
    ),
    responses(
        (status = 200, description = "Group audit trail", body = Vec<GroupAudit>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group_audits(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Query(query): Query<RequesterQuery>,
) -> Result<Json<Vec<GroupAudit>>, ApiError> {
    let audits = service.get_group_audits(&group_id, &query.user_id).await?;
    Ok(Json(audits))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application log", body = Vec<AppLog>)
    )
)]
pub async fn get_app_logs(State(service): State<AppService>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
