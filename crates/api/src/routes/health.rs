//! Liveness endpoint.
//!
//! Besides confirming the process is up, it reports which rounding policy the
//! calculator was configured with, so a deployment can be checked without
//! reading its config files.

use axum::{Json, Router, extract::State, routing::get};
use billsplit_shared::config::PercentageRounding;
use serde::Serialize;

use crate::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    /// Always `"ok"` while the server answers.
    pub status: &'static str,
    /// Crate version of the running binary.
    pub version: &'static str,
    /// Active rounding mode for percentage splits.
    pub percentage_rounding: PercentageRounding,
}

async fn service_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        percentage_rounding: state.calculator.policy().percentage_rounding,
    })
}

/// Routes for the liveness endpoint.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(service_status))
}
