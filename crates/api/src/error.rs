//! Mapping of application errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use billsplit_core::split::SplitError;
use billsplit_shared::AppError;
use serde_json::json;

/// Error returned by handlers and extractors.
///
/// Wraps [`AppError`] so it can be turned into a response. Split errors keep
/// their specific reason code alongside the generic error code.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    reason: Option<&'static str>,
}

impl ApiError {
    /// Returns the wrapped application error.
    #[must_use]
    pub const fn app_error(&self) -> &AppError {
        &self.error
    }

    /// Returns the specific rejection reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<&'static str> {
        self.reason
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            reason: None,
        }
    }
}

impl From<SplitError> for ApiError {
    fn from(error: SplitError) -> Self {
        Self {
            reason: Some(error.error_code()),
            error: AppError::InvalidSplit(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = json!({
            "error": self.error.error_code(),
            "message": self.error.message(),
        });
        if let Some(reason) = self.reason {
            body["reason"] = json!(reason);
        }

        (status, Json(body)).into_response()
    }
}
