use axum::{extract::State, http::StatusCode, response::Json};
use common::{AiRecommendation, ExpenseBreakdown};
use model::savings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::extract::{validate_amount_limit, validate_positive, ValidatedJson};
use crate::schemas::{internal_error, model_error, AppState, ErrorResponse, HandlerError};

/// Request body for a savings recommendation
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Salary minus expenses, may be negative
    #[validate(custom(function = "validate_amount_limit"))]
    pub saved_amount: Decimal,
    /// Spending per category
    #[schema(value_type = BTreeMap<String, f64>)]
    pub expense_breakdown: ExpenseBreakdown,
    #[validate(
        custom(function = "validate_positive", message = "Total salary must be positive"),
        custom(function = "validate_amount_limit")
    )]
    pub total_salary: Decimal,
    /// When set, the recommendation is stored as the cycle's savings decision
    pub salary_cycle_id: Option<i32>,
}

/// Recommend how to allocate a cycle's savings
#[utoipa::path(
    post,
    path = "/api/ai/recommendation",
    tag = "ai",
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "Allocation recommendation", body = AiRecommendation),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Salary cycle not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_recommendation(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecommendationRequest>,
) -> Result<Json<AiRecommendation>, HandlerError> {
    trace!("Entering create_recommendation function");

    let recommendation = compute::recommend(
        request.saved_amount,
        &request.expense_breakdown,
        request.total_salary,
    );
    debug!("Recommendation has {} reasoning lines", recommendation.reasoning.len());

    if let Some(cycle_id) = request.salary_cycle_id {
        let suggestions = serde_json::to_value(&recommendation).map_err(|e| {
            error!("Failed to serialize recommendation: {}", e);
            internal_error()
        })?;

        savings::upsert_decision(&state.db, cycle_id, request.saved_amount, suggestions)
            .await
            .map_err(|e| model_error(e, StatusCode::NOT_FOUND))?;
        info!("Savings decision stored for cycle {}", cycle_id);
    }

    Ok(Json(recommendation))
}
