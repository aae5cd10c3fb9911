//! Configuration System
//!
//! Layered configuration: a global TOML file under the XDG config directory,
//! overridden by `ENVMELD_*` environment variables. There is no per-workspace
//! configuration; a per-prompt child process has exactly one user.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvmeldConfig {
    /// Capture and export shell aliases alongside variables. Off by default:
    /// alias capture costs a subshell on every prompt.
    #[serde(default)]
    pub enable_alias_export: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for EnvmeldConfig {
    fn default() -> Self {
        Self {
            enable_alias_export: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Loads configuration from the global file and environment overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration. An explicit path wins over the global file; either
    /// way `ENVMELD_*` environment variables override file values
    /// (`ENVMELD_ENABLE_ALIAS_EXPORT`, `ENVMELD_LOGGING__LEVEL`, ...).
    pub fn load(explicit: Option<&Path>) -> Result<EnvmeldConfig, ApiError> {
        let mut builder = Config::builder();

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()));
        } else if let Some(path) = Self::global_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("ENVMELD").separator("__"));

        let config = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Path to the global config file:
    /// `$XDG_CONFIG_HOME/envmeld/config.toml` (or the platform equivalent).
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "envmeld").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
