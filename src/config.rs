// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::models::Region;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the profile store
    pub store_dir: PathBuf,
    /// Grid region for equivalents that are not tied to an entry
    pub default_region: Region,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(".campus-co2"),
            default_region: Region::Alberta,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let default_region = match env::var("CO2_DEFAULT_REGION") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "CO2_DEFAULT_REGION",
                value,
            })?,
            Err(_) => Region::Alberta,
        };

        Ok(Self {
            store_dir: env::var("CO2_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".campus-co2")),
            default_region,
            log_json: env::var("CO2_LOG_JSON")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
