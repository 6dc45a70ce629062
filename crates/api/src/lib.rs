//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Stateless split and balance calculation routes
//! - A validating JSON extractor
//! - Error-to-response mapping

pub mod error;
pub mod extractors;
pub mod routes;
mod validation;

use axum::Router;
use billsplit_core::split::SplitCalculator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Split calculator built from configuration at start-up.
    pub calculator: SplitCalculator,
}

impl AppState {
    /// Creates the state around a configured calculator.
    #[must_use]
    pub const fn new(calculator: SplitCalculator) -> Self {
        Self { calculator }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
