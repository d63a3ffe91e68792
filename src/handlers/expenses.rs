use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use common::EXPENSE_CATEGORIES;
use model::entities::expense;
use model::expenses::{self, ExpenseChanges, NewExpense};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::extract::{validate_amount_limit, validate_positive, ValidatedJson};
use crate::schemas::{model_error, AppState, ErrorResponse, HandlerError};

/// Request body for logging an expense
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[validate(
        custom(function = "validate_positive", message = "Amount must be positive"),
        custom(function = "validate_amount_limit")
    )]
    pub amount: Decimal,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub note: Option<String>,
    /// Defaults to false
    pub is_default: Option<bool>,
}

/// Request body for updating an expense
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    #[validate(
        custom(function = "validate_positive", message = "Amount must be positive"),
        custom(function = "validate_amount_limit")
    )]
    pub amount: Option<Decimal>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,
    pub note: Option<String>,
}

/// Expense response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: i32,
    pub salary_cycle_id: i32,
    pub amount: Decimal,
    pub category: String,
    pub note: Option<String>,
    /// Seeded from a default expense template
    pub is_default: bool,
    pub created_at: NaiveDateTime,
}

impl From<expense::Model> for ExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            salary_cycle_id: model.salary_cycle_id,
            amount: model.amount,
            category: model.category,
            note: model.note,
            is_default: model.is_default,
            created_at: model.created_at,
        }
    }
}

/// Log an expense against the active cycle
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense created", body = ExpenseResponse),
        (status = 400, description = "Invalid request or no active salary cycle", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), HandlerError> {
    trace!("Entering create_expense function");

    let new_expense = NewExpense {
        amount: request.amount,
        category: request.category,
        note: request.note,
        is_default: request.is_default.unwrap_or(false),
    };

    match expenses::add_expense(&state.db, new_expense).await {
        Ok(created) => {
            state.invalidate_analytics().await;
            info!("Expense {} of {} logged as {}", created.id, created.amount, created.category);
            Ok((StatusCode::CREATED, Json(ExpenseResponse::from(created))))
        }
        Err(e) => Err(model_error(e, StatusCode::BAD_REQUEST)),
    }
}

/// Expenses of the active cycle, newest first
#[utoipa::path(
    get,
    path = "/api/expenses/current",
    tag = "expenses",
    responses(
        (status = 200, description = "Expenses of the active cycle, empty without one", body = [ExpenseResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_current_expenses(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpenseResponse>>, HandlerError> {
    trace!("Entering get_current_expenses function");

    match expenses::expenses_for_active_cycle(&state.db).await {
        Ok(found) => {
            debug!("Retrieved {} expenses", found.len());
            Ok(Json(found.into_iter().map(ExpenseResponse::from).collect()))
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}

/// Suggested expense categories
#[utoipa::path(
    get,
    path = "/api/expenses/categories",
    tag = "expenses",
    responses(
        (status = 200, description = "Category catalog", body = [String])
    )
)]
pub async fn get_categories() -> Json<Vec<String>> {
    Json(EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect())
}

/// Update an expense
#[utoipa::path(
    patch,
    path = "/api/expenses/{id}",
    tag = "expenses",
    params(
        ("id" = i32, Path, description = "Expense ID"),
    ),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense updated", body = ExpenseResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_expense(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, HandlerError> {
    trace!("Entering update_expense function for id: {}", id);

    let changes = ExpenseChanges {
        amount: request.amount,
        category: request.category,
        note: request.note,
    };

    match expenses::update_expense(&state.db, id, changes).await {
        Ok(updated) => {
            state.invalidate_analytics().await;
            info!("Expense {} updated", id);
            Ok(Json(ExpenseResponse::from(updated)))
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}

/// Delete an expense
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "expenses",
    params(
        ("id" = i32, Path, description = "Expense ID"),
    ),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_expense(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, HandlerError> {
    trace!("Entering delete_expense function for id: {}", id);

    match expenses::delete_expense(&state.db, id).await {
        Ok(()) => {
            state.invalidate_analytics().await;
            info!("Expense {} deleted", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}
