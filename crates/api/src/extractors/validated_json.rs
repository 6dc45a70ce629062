//! Validated JSON extractor.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use billsplit_shared::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::ApiError;

/// JSON extractor that deserializes and then validates the payload.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        value.validate().map_err(|e| {
            // first field-level message, else the full report
            let message = e
                .field_errors()
                .values()
                .next()
                .and_then(|errors| errors.first())
                .and_then(|error| error.message.as_ref())
                .map_or_else(|| e.to_string(), ToString::to_string);
            AppError::Validation(message)
        })?;

        Ok(Self(value))
    }
}
