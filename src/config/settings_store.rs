// ABOUTME: File-backed persistence for AI settings encoded as base64 JSON
// ABOUTME: Loading never fails; a missing or undecodable file yields defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gut_tracker_core::errors::{AppError, AppResult};
use tokio::fs;
use tracing::{debug, warn};

use super::settings::AiSettings;

/// Reads and writes [`AiSettings`] at a fixed path
///
/// The file holds `base64(json)`. The encoding keeps API keys out of casual
/// view; it is not encryption.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// File name used inside the data directory
    pub const FILE_NAME: &'static str = "ai-settings.b64";

    /// Store at an explicit path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside a data directory
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(Self::FILE_NAME))
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any failure
    pub async fn load(&self) -> AiSettings {
        match self.try_load().await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!(path = %self.path.display(), "no AI settings file, using defaults");
                AiSettings::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable AI settings, using defaults");
                AiSettings::default()
            }
        }
    }

    async fn try_load(&self) -> AppResult<Option<AiSettings>> {
        let encoded = match fs::read_to_string(&self.path).await {
            Ok(encoded) => encoded,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AppError::storage(format!("settings are not valid base64: {e}")))?;
        Ok(Some(serde_json::from_slice(&decoded)?))
    }

    /// Persist settings, creating the parent directory if needed
    ///
    /// # Errors
    ///
    /// Returns a storage error when the file cannot be written
    pub async fn save(&self, settings: &AiSettings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec(settings)?;
        fs::write(&self.path, STANDARD.encode(json)).await?;
        debug!(path = %self.path.display(), provider = %settings.selected_provider, "AI settings saved");
        Ok(())
    }
}
