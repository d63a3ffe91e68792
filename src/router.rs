use crate::config::Settings;
use crate::handlers::{
    ai::create_recommendation,
    analytics::{get_current_analytics, get_history_analytics},
    defaults::{create_default, delete_default, get_defaults, update_default},
    expenses::{create_expense, delete_expense, get_categories, get_current_expenses, update_expense},
    health::health_check,
    salary::{
        create_salary, delete_current_salary, get_current_salary, get_salary_history,
        update_current_salary,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
            CorsLayer::permissive()
        }
    }
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Salary cycle lifecycle
        .route("/api/salary", post(create_salary))
        .route(
            "/api/salary/current",
            get(get_current_salary)
                .patch(update_current_salary)
                .delete(delete_current_salary),
        )
        .route("/api/salary/history", get(get_salary_history))
        // Expenses
        .route("/api/expenses", post(create_expense))
        .route("/api/expenses/current", get(get_current_expenses))
        .route("/api/expenses/categories", get(get_categories))
        .route("/api/expenses/:id", patch(update_expense).delete(delete_expense))
        // Default expense templates
        .route("/api/defaults", get(get_defaults).post(create_default))
        .route("/api/defaults/:id", patch(update_default).delete(delete_default))
        // Analytics and recommendations
        .route("/api/analytics/current", get(get_current_analytics))
        .route("/api/analytics/history", get(get_history_analytics))
        .route("/api/ai/recommendation", post(create_recommendation))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.request_timeout_secs,
                )))
                .layer(cors_layer(settings.cors_origin.as_deref())),
        )
        .with_state(state)
}
