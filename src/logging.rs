//! Logging System
//!
//! Structured logging via the `tracing` crate. All diagnostics go to stderr:
//! stdout carries the shell-eval payload and nothing else may be written to
//! it. Levels and filtering follow the `ENVMELD_LOG` environment variable
//! when set, the configuration otherwise.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// Priority order (highest to lowest): the `ENVMELD_LOG` environment
/// variable, then the passed configuration, then defaults.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let filter = build_env_filter(config)?;

    match config.format.as_str() {
        "json" => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        "text" => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(config.color)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        other => {
            return Err(ApiError::Config(format!(
                "Invalid log format: {other} (must be 'json' or 'text')"
            )));
        }
    }

    Ok(())
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env("ENVMELD_LOG") {
        return Ok(filter);
    }

    match config.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => {
            Ok(EnvFilter::new(&config.level))
        }
        other => Err(ApiError::Config(format!(
            "Invalid log level: {other} (must be trace, debug, info, warn, error, or off)"
        ))),
    }
}
