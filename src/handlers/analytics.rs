use axum::{extract::State, http::StatusCode, response::Json};
use common::{CycleAnalytics, HistoricalCycle};
use model::cycle;
use model::ModelError;
use tracing::{debug, error, info, instrument, trace};

use crate::schemas::{
    internal_error, model_error, AppState, CachedData, ErrorResponse, HandlerError,
};

/// Spending overview of the active cycle
#[utoipa::path(
    get,
    path = "/api/analytics/current",
    tag = "analytics",
    responses(
        (status = 200, description = "Analytics of the active cycle", body = CycleAnalytics),
        (status = 404, description = "No active salary cycle", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_current_analytics(
    State(state): State<AppState>,
) -> Result<Json<CycleAnalytics>, HandlerError> {
    trace!("Entering get_current_analytics function");

    let active = match cycle::get_active_cycle(&state.db).await {
        Ok(Some(active)) => active,
        Ok(None) => return Err(model_error(ModelError::NoActiveCycle, StatusCode::NOT_FOUND)),
        Err(e) => return Err(model_error(e, StatusCode::NOT_FOUND)),
    };

    match compute::current_analytics(&active.cycle, &active.expenses) {
        Ok(analytics) => {
            debug!(
                "Cycle {} has spent {}%",
                analytics.cycle_id, analytics.spent_percent
            );
            Ok(Json(analytics))
        }
        Err(e) => {
            error!("Failed to compute analytics for cycle {}: {}", active.cycle.id, e);
            Err(internal_error())
        }
    }
}

/// Summaries of all closed cycles, oldest first
#[utoipa::path(
    get,
    path = "/api/analytics/history",
    tag = "analytics",
    responses(
        (status = 200, description = "Closed cycle summaries", body = [HistoricalCycle]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_history_analytics(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoricalCycle>>, HandlerError> {
    trace!("Entering get_history_analytics function");

    let cache_key = state.history_cache_key();
    if let Some(CachedData::History(history)) = state.cache.get(&cache_key).await {
        debug!("Serving {} historical cycles from cache", history.len());
        return Ok(Json(history));
    }

    let closed = cycle::closed_cycles_with_expenses(&state.db)
        .await
        .map_err(|e| model_error(e, StatusCode::NOT_FOUND))?;

    let history = closed
        .iter()
        .map(|(cycle, expenses)| compute::historical_cycle(cycle, expenses))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!("Failed to compute cycle history: {}", e);
            internal_error()
        })?;

    state
        .cache
        .insert(cache_key, CachedData::History(history.clone()))
        .await;
    info!("Computed history of {} closed cycles", history.len());

    Ok(Json(history))
}
