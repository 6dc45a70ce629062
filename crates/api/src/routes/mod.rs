//! API route definitions.

use axum::Router;
use billsplit_shared::AppError;

use crate::{ApiError, AppState};

pub mod balances;
pub mod health;
pub mod splits;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(splits::routes())
        .merge(balances::routes())
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    AppError::NotFound("No route matches this path".to_string()).into()
}
