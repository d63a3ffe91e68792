//! Request body extraction with validation.

use axum::{
    async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
    response::Json,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::schemas::{HandlerError, validation_error};

/// JSON body that has passed `validator` checks.
///
/// Malformed JSON, missing fields and failed constraints are all rejected
/// with a 400 carrying a single message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!("Rejected request body: {}", rejection.body_text());
            validation_error(rejection.body_text())
        })?;

        value.validate().map_err(|errors| {
            let message = first_validation_message(&errors);
            warn!("Request validation failed: {}", message);
            validation_error(message)
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Message of the first failing field, fields taken in name order.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(name, errs)| errs.iter().map(move |err| (name, err)))
        .next()
        .map(|(name, err)| match &err.message {
            Some(message) => message.to_string(),
            None => format!("Invalid value for {}", name),
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}

/// Largest magnitude accepted for any money field. Totals over a cycle's
/// expenses stay far from `Decimal::MAX` below this bound.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive"))
    }
}

pub fn validate_amount_limit(value: &Decimal) -> Result<(), ValidationError> {
    if value.abs() <= MAX_AMOUNT {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_limit");
        err.message = Some(format!("Amount must not exceed {}", MAX_AMOUNT).into());
        Err(err)
    }
}
