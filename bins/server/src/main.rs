//! Billsplit API Server
//!
//! Main entry point for the Billsplit backend service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use billsplit_api::{AppState, create_router};
use billsplit_core::split::{SplitCalculator, SplitPolicy};
use billsplit_shared::{AppConfig, config::LoggingConfig};

/// Installs the tracing subscriber described by `logging`.
///
/// Does nothing when logging is disabled.
fn init_tracing(logging: &LoggingConfig) {
    if !logging.enabled {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    let policy = SplitPolicy::from(&config.splits);
    info!(percentage_rounding = ?policy.percentage_rounding, "Split calculator configured");

    let state = AppState::new(SplitCalculator::new(policy));
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
