// ABOUTME: Application configuration loaded from environment variables
// ABOUTME: Data directory, HTTP client timeouts and AI settings resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::path::PathBuf;

use gut_tracker_core::constants::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use gut_tracker_core::errors::{AppError, AppResult};
use tracing::info;

use super::settings::AiSettings;
use super::settings_store::SettingsStore;

/// Environment variable for the data directory
pub const DATA_DIR_ENV: &str = "GUT_TRACKER_DATA_DIR";
/// Environment variable for the HTTP request timeout
pub const HTTP_TIMEOUT_ENV: &str = "GUT_TRACKER_HTTP_TIMEOUT_SECS";
/// Environment variable for the HTTP connect timeout
pub const HTTP_CONNECT_TIMEOUT_ENV: &str = "GUT_TRACKER_HTTP_CONNECT_TIMEOUT_SECS";

/// HTTP client timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding journal files and AI settings
    pub data_dir: PathBuf,
    /// HTTP client timeouts
    pub http: HttpClientConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a timeout is not a positive integer
    /// or no data directory can be determined
    pub fn from_env() -> AppResult<Self> {
        let data_dir = match env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::data_dir()
                .map(|dir| dir.join("gut-tracker"))
                .ok_or_else(|| {
                    AppError::config(format!(
                        "cannot determine a data directory, set {DATA_DIR_ENV}"
                    ))
                })?,
        };

        let http = HttpClientConfig {
            timeout_secs: parse_secs(HTTP_TIMEOUT_ENV, DEFAULT_TIMEOUT_SECS)?,
            connect_timeout_secs: parse_secs(
                HTTP_CONNECT_TIMEOUT_ENV,
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self { data_dir, http })
    }

    /// Replace the data directory
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Settings store inside the data directory
    #[must_use]
    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::in_dir(&self.data_dir)
    }

    /// Stored AI settings overlaid with environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the environment names an unknown provider
    pub async fn load_ai_settings(&self) -> AppResult<AiSettings> {
        self.settings_store().load().await.with_env_overrides()
    }

    /// Log configuration summary
    pub fn log_summary(&self) {
        info!(
            data_dir = %self.data_dir.display(),
            http_timeout_secs = self.http.timeout_secs,
            http_connect_timeout_secs = self.http.connect_timeout_secs,
            "configuration loaded"
        );
    }
}

fn parse_secs(key: &str, default: u64) -> AppResult<u64> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(AppError::config(format!(
                "{key} must be a positive number of seconds, got '{raw}'"
            ))),
        },
        _ => Ok(default),
    }
}
