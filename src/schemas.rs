use axum::{http::StatusCode, response::Json};
use common::{AiRecommendation, CycleAnalytics, HistoricalCycle};
use model::ModelError;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::{
    ai::RecommendationRequest,
    defaults::{CreateDefaultRequest, DefaultExpenseResponse, UpdateDefaultRequest},
    expenses::{CreateExpenseRequest, ExpenseResponse, UpdateExpenseRequest},
    salary::{
        CycleHistoryResponse, SalaryCycleResponse, SalaryRequest, SavingsDecisionResponse,
    },
};

/// Cache key prefix of the closed-cycle history.
pub const HISTORY_CACHE_KEY: &str = "analytics:history";

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
    /// Bumped by every mutation; cached analytics are keyed by it.
    pub analytics_generation: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, cache: Cache<String, CachedData>) -> Self {
        Self {
            db,
            cache,
            analytics_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Key of the history for the current data. Must be taken before the
    /// database is read.
    pub fn history_cache_key(&self) -> String {
        history_key(self.analytics_generation.load(Ordering::Acquire))
    }

    /// Moves cached analytics to a new generation; called after every mutation.
    pub async fn invalidate_analytics(&self) {
        let previous = self.analytics_generation.fetch_add(1, Ordering::AcqRel);
        self.cache.invalidate(&history_key(previous)).await;
    }
}

fn history_key(generation: u64) -> String {
    format!("{}:{}", HISTORY_CACHE_KEY, generation)
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    History(Vec<HistoricalCycle>),
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Error half of every handler result.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

pub fn validation_error(message: impl Into<String>) -> HandlerError {
    error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
}

/// Opaque 500; the details only go to the log.
pub fn internal_error() -> HandlerError {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Internal server error",
    )
}

/// Maps a model error to a response. `no_active_status` differs per route:
/// adding an expense without a cycle is a bad request, reading one is a 404.
pub fn model_error(err: ModelError, no_active_status: StatusCode) -> HandlerError {
    match err {
        ModelError::NoActiveCycle => {
            warn!("{}", err);
            error_response(no_active_status, "NO_ACTIVE_CYCLE", err.to_string())
        }
        ModelError::NotFound { .. } => {
            warn!("{}", err);
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        ModelError::Database(db_error) => {
            error!("Database error: {}", db_error);
            internal_error()
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::salary::create_salary,
        crate::handlers::salary::get_current_salary,
        crate::handlers::salary::get_salary_history,
        crate::handlers::salary::update_current_salary,
        crate::handlers::salary::delete_current_salary,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::get_current_expenses,
        crate::handlers::expenses::get_categories,
        crate::handlers::expenses::update_expense,
        crate::handlers::expenses::delete_expense,
        crate::handlers::defaults::get_defaults,
        crate::handlers::defaults::create_default,
        crate::handlers::defaults::update_default,
        crate::handlers::defaults::delete_default,
        crate::handlers::analytics::get_current_analytics,
        crate::handlers::analytics::get_history_analytics,
        crate::handlers::ai::create_recommendation,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            SalaryRequest,
            SalaryCycleResponse,
            SavingsDecisionResponse,
            CycleHistoryResponse,
            CreateExpenseRequest,
            UpdateExpenseRequest,
            ExpenseResponse,
            CreateDefaultRequest,
            UpdateDefaultRequest,
            DefaultExpenseResponse,
            RecommendationRequest,
            AiRecommendation,
            CycleAnalytics,
            HistoricalCycle,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "salary", description = "Salary cycle lifecycle"),
        (name = "expenses", description = "Expenses of the active cycle"),
        (name = "defaults", description = "Recurring default expense templates"),
        (name = "analytics", description = "Spending analytics"),
        (name = "ai", description = "Savings allocation recommendations"),
    ),
    info(
        title = "PayCycle API",
        description = "Salary-cycle budgeting tracker with rule-based savings recommendations",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
