use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDateTime;
use model::cycle::{self, CycleHistoryPage, CycleWithDetails};
use model::entities::savings_decision;
use model::ModelError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::expenses::ExpenseResponse;
use crate::extract::{validate_amount_limit, validate_positive, ValidatedJson};
use crate::schemas::{model_error, AppState, ErrorResponse, HandlerError};

/// Request body for crediting or correcting a salary
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRequest {
    /// Credited salary, must be positive
    #[validate(
        custom(function = "validate_positive", message = "Salary must be positive"),
        custom(function = "validate_amount_limit")
    )]
    pub salary_amount: Decimal,
}

/// Query parameters for the cycle history
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct HistoryQuery {
    /// Page number, starting at 1 (default: 1)
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    /// Page size, 1 to 100 (default: 10)
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
}

/// Savings decision stored for a cycle
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavingsDecisionResponse {
    pub id: i32,
    pub salary_cycle_id: i32,
    pub saved_amount: Decimal,
    /// The recommendation as it was returned to the client
    #[schema(value_type = Object)]
    pub ai_suggestions: serde_json::Value,
    pub user_choice: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<savings_decision::Model> for SavingsDecisionResponse {
    fn from(model: savings_decision::Model) -> Self {
        Self {
            id: model.id,
            salary_cycle_id: model.salary_cycle_id,
            saved_amount: model.saved_amount,
            ai_suggestions: model.ai_suggestions,
            user_choice: model.user_choice,
            created_at: model.created_at,
        }
    }
}

/// Salary cycle with its expenses (newest first) and savings decision
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryCycleResponse {
    pub id: i32,
    pub salary_amount: Decimal,
    pub credited_at: NaiveDateTime,
    pub closed_at: Option<NaiveDateTime>,
    /// `ACTIVE` or `CLOSED`
    pub status: String,
    /// Frozen when the cycle is closed
    pub total_expenses: Option<Decimal>,
    /// Frozen when the cycle is closed
    pub total_saved: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub expenses: Vec<ExpenseResponse>,
    pub savings: Option<SavingsDecisionResponse>,
}

impl From<CycleWithDetails> for SalaryCycleResponse {
    fn from(details: CycleWithDetails) -> Self {
        let cycle = details.cycle;
        Self {
            id: cycle.id,
            salary_amount: cycle.salary_amount,
            credited_at: cycle.credited_at,
            closed_at: cycle.closed_at,
            status: cycle.status.as_str().to_string(),
            total_expenses: cycle.total_expenses,
            total_saved: cycle.total_saved,
            created_at: cycle.created_at,
            expenses: details.expenses.into_iter().map(ExpenseResponse::from).collect(),
            savings: details.savings.map(SavingsDecisionResponse::from),
        }
    }
}

/// One page of closed cycles
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CycleHistoryResponse {
    pub cycles: Vec<SalaryCycleResponse>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl From<CycleHistoryPage> for CycleHistoryResponse {
    fn from(page: CycleHistoryPage) -> Self {
        Self {
            cycles: page.cycles.into_iter().map(SalaryCycleResponse::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// Credit a new salary, closing the active cycle
#[utoipa::path(
    post,
    path = "/api/salary",
    tag = "salary",
    request_body = SalaryRequest,
    responses(
        (status = 201, description = "Cycle created and seeded with default expenses", body = SalaryCycleResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_salary(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SalaryRequest>,
) -> Result<(StatusCode, Json<SalaryCycleResponse>), HandlerError> {
    trace!("Entering create_salary function");
    debug!("Crediting salary of {}", request.salary_amount);

    match cycle::create_cycle(&state.db, request.salary_amount).await {
        Ok(created) => {
            state.invalidate_analytics().await;
            info!(
                "Salary cycle {} created with {} default expenses",
                created.cycle.id,
                created.expenses.len()
            );
            Ok((StatusCode::CREATED, Json(SalaryCycleResponse::from(created))))
        }
        Err(e) => Err(model_error(e, StatusCode::INTERNAL_SERVER_ERROR)),
    }
}

/// Get the active salary cycle
#[utoipa::path(
    get,
    path = "/api/salary/current",
    tag = "salary",
    responses(
        (status = 200, description = "Active cycle", body = SalaryCycleResponse),
        (status = 404, description = "No active salary cycle", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_current_salary(
    State(state): State<AppState>,
) -> Result<Json<SalaryCycleResponse>, HandlerError> {
    trace!("Entering get_current_salary function");

    match cycle::get_active_cycle(&state.db).await {
        Ok(Some(active)) => {
            debug!("Active cycle is {}", active.cycle.id);
            Ok(Json(SalaryCycleResponse::from(active)))
        }
        Ok(None) => Err(model_error(ModelError::NoActiveCycle, StatusCode::NOT_FOUND)),
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}

/// Closed cycles, most recent first
#[utoipa::path(
    get,
    path = "/api/salary/history",
    tag = "salary",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Page of closed cycles", body = CycleHistoryResponse),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_salary_history(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<HistoryQuery>>,
) -> Result<Json<CycleHistoryResponse>, HandlerError> {
    trace!("Entering get_salary_history function");

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    debug!("Fetching cycle history - page: {}, limit: {}", page, limit);

    match cycle::get_cycle_history(&state.db, page, limit).await {
        Ok(history) => {
            info!(
                "Retrieved {} of {} closed cycles",
                history.cycles.len(),
                history.total
            );
            Ok(Json(CycleHistoryResponse::from(history)))
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}

/// Correct the salary of the active cycle
#[utoipa::path(
    patch,
    path = "/api/salary/current",
    tag = "salary",
    request_body = SalaryRequest,
    responses(
        (status = 200, description = "Cycle updated", body = SalaryCycleResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "No active salary cycle", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_current_salary(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SalaryRequest>,
) -> Result<Json<SalaryCycleResponse>, HandlerError> {
    trace!("Entering update_current_salary function");

    match cycle::update_active_cycle_salary(&state.db, request.salary_amount).await {
        Ok(updated) => {
            state.invalidate_analytics().await;
            info!("Salary of cycle {} set to {}", updated.cycle.id, request.salary_amount);
            Ok(Json(SalaryCycleResponse::from(updated)))
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}

/// Delete the active cycle together with its expenses
#[utoipa::path(
    delete,
    path = "/api/salary/current",
    tag = "salary",
    responses(
        (status = 204, description = "Cycle deleted"),
        (status = 404, description = "No active salary cycle", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_current_salary(
    State(state): State<AppState>,
) -> Result<StatusCode, HandlerError> {
    trace!("Entering delete_current_salary function");

    match cycle::delete_active_cycle(&state.db).await {
        Ok(()) => {
            state.invalidate_analytics().await;
            info!("Active salary cycle deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}
