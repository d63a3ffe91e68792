use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::defaults::{self, DefaultChanges};
use model::entities::default_expense;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::extract::{validate_amount_limit, validate_positive, ValidatedJson};
use crate::schemas::{model_error, AppState, ErrorResponse, HandlerError};

/// Request body for creating a default expense template
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDefaultRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(
        custom(function = "validate_positive", message = "Amount must be positive"),
        custom(function = "validate_amount_limit")
    )]
    pub amount: Decimal,
}

/// Request body for updating a default expense template
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDefaultRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(
        custom(function = "validate_positive", message = "Amount must be positive"),
        custom(function = "validate_amount_limit")
    )]
    pub amount: Option<Decimal>,
    /// Inactive templates are not applied to new cycles
    pub is_active: Option<bool>,
}

/// Default expense template
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefaultExpenseResponse {
    pub id: i32,
    pub name: String,
    pub amount: Decimal,
    pub is_active: bool,
}

impl From<default_expense::Model> for DefaultExpenseResponse {
    fn from(model: default_expense::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            amount: model.amount,
            is_active: model.is_active,
        }
    }
}

/// All default expense templates, by name
#[utoipa::path(
    get,
    path = "/api/defaults",
    tag = "defaults",
    responses(
        (status = 200, description = "Templates retrieved", body = [DefaultExpenseResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_defaults(
    State(state): State<AppState>,
) -> Result<Json<Vec<DefaultExpenseResponse>>, HandlerError> {
    trace!("Entering get_defaults function");

    match defaults::list_defaults(&state.db).await {
        Ok(templates) => {
            debug!("Retrieved {} default expenses", templates.len());
            Ok(Json(
                templates.into_iter().map(DefaultExpenseResponse::from).collect(),
            ))
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}

/// Create a default expense template
#[utoipa::path(
    post,
    path = "/api/defaults",
    tag = "defaults",
    request_body = CreateDefaultRequest,
    responses(
        (status = 201, description = "Template created", body = DefaultExpenseResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_default(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDefaultRequest>,
) -> Result<(StatusCode, Json<DefaultExpenseResponse>), HandlerError> {
    trace!("Entering create_default function");

    match defaults::add_default(&state.db, request.name, request.amount).await {
        Ok(created) => {
            info!("Default expense {} created", created.id);
            Ok((StatusCode::CREATED, Json(DefaultExpenseResponse::from(created))))
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}

/// Update a default expense template
#[utoipa::path(
    patch,
    path = "/api/defaults/{id}",
    tag = "defaults",
    params(
        ("id" = i32, Path, description = "Default expense ID"),
    ),
    request_body = UpdateDefaultRequest,
    responses(
        (status = 200, description = "Template updated", body = DefaultExpenseResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Template not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_default(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateDefaultRequest>,
) -> Result<Json<DefaultExpenseResponse>, HandlerError> {
    trace!("Entering update_default function for id: {}", id);

    let changes = DefaultChanges {
        name: request.name,
        amount: request.amount,
        is_active: request.is_active,
    };

    match defaults::update_default(&state.db, id, changes).await {
        Ok(updated) => {
            info!("Default expense {} updated", id);
            Ok(Json(DefaultExpenseResponse::from(updated)))
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}

/// Delete a default expense template
#[utoipa::path(
    delete,
    path = "/api/defaults/{id}",
    tag = "defaults",
    params(
        ("id" = i32, Path, description = "Default expense ID"),
    ),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 404, description = "Template not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_default(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, HandlerError> {
    trace!("Entering delete_default function for id: {}", id);

    match defaults::delete_default(&state.db, id).await {
        Ok(()) => {
            info!("Default expense {} deleted", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(model_error(e, StatusCode::NOT_FOUND)),
    }
}
