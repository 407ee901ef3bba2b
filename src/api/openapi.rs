use utoipa::OpenApi;

use crate::{
    api::models::{
        AddExpenseRequest, AddMemberRequest, ClearSettlementsRequest, ClearSettlementsResponse, CreateGroupRequest,
        ErrorResponse, MaxSettlementRequest, RecordSettlementRequest, RemoveExpenseRequest, ShareRequest,
    },
    core::{
        models::{
            audit::{AppLog, GroupAudit},
            balance::{DenialReason, MaxSettlement, MemberBalance, SettlementSuggestion},
            expense::{Expense, Share},
            group::{Group, Member},
            settlement::{Settlement, SettlementMethod, SettlementStatus},
        },
        services::{
            ExpenseActivity, FriendBalance, GroupBalanceSummary, GroupSettlementSuggestion, GroupSummary, Person,
            PersonActivity, PersonDetail, UserSummary,
        },
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_group,
        super::handlers::get_group_summary,
        super::handlers::add_member,
        super::handlers::add_expense,
        super::handlers::remove_expense,
        super::handlers::record_settlement,
        super::handlers::max_settlement_allowed,
        super::handlers::clear_settlements,
        super::handlers::get_user_summary,
        super::handlers::list_people,
        super::handlers::get_person_detail,
        super::handlers::get_group_audits,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateGroupRequest,
        AddMemberRequest,
        ShareRequest,
        AddExpenseRequest,
        RemoveExpenseRequest,
        RecordSettlementRequest,
        MaxSettlementRequest,
        ClearSettlementsRequest,
        ClearSettlementsResponse,
        ErrorResponse,
        Group,
        Member,
        Expense,
        Share,
        Settlement,
        SettlementMethod,
        SettlementStatus,
        MemberBalance,
        SettlementSuggestion,
        MaxSettlement,
        DenialReason,
        ExpenseActivity,
        GroupSummary,
        GroupBalanceSummary,
        FriendBalance,
        UserSummary,
        Person,
        PersonActivity,
        PersonDetail,
        GroupSettlementSuggestion,
        AppLog,
        GroupAudit
    )),
    info(
        title = "SettleUp API",
        description = "Group balances, settlement suggestions and guarded settlements",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
