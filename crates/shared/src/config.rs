//! Application configuration management.

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Split calculation configuration.
    #[serde(default)]
    pub splits: SplitsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Logging configuration.
///
/// Read once at start-up and handed to whatever installs the subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Whether a tracing subscriber is installed at all.
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,
    /// Filter directives used when `RUST_LOG` is unset.
    #[serde(default = "default_logging_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            filter: default_logging_filter(),
            json: false,
        }
    }
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_filter() -> String {
    "billsplit=info,tower_http=info".to_string()
}

/// How percentage splits are rounded to cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageRounding {
    /// Floor every share and hand leftover cents to the largest fractional
    /// parts, so shares always add up to the total.
    #[default]
    LargestRemainder,
    /// Round every share on its own; the sum may drift by a few cents.
    Independent,
}

/// Split calculation configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SplitsConfig {
    /// Rounding mode for percentage splits.
    #[serde(default)]
    pub percentage_rounding: PercentageRounding,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BILLSPLIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
