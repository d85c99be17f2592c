// ABOUTME: Shared configuration types used across config modules
// ABOUTME: Contains the AiProviderId enum naming the four supported AI providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use gut_tracker_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// AI provider identifier
///
/// Dispatch over providers is a total match on this enum. Ids arriving as
/// strings (settings files, environment, CLI) go through [`FromStr`], which
/// reports unknown ids as configuration errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderId {
    /// `OpenAI` chat completions (default)
    #[default]
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// Google Gemini generateContent API
    Gemini,
    /// Local Ollama server
    Ollama,
}

impl AiProviderId {
    /// Environment variable for provider selection
    pub const ENV_VAR: &'static str = "GUT_TRACKER_AI_PROVIDER";

    /// Every known provider, in display order
    pub const ALL: [Self; 4] = [Self::OpenAi, Self::Anthropic, Self::Gemini, Self::Ollama];

    /// Stable identifier used in settings and error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }

    /// Human-readable provider name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Google Gemini",
            Self::Ollama => "Ollama (local)",
        }
    }

    /// Whether calls need an API key
    #[must_use]
    pub const fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }

    /// Read the selection from `GUT_TRACKER_AI_PROVIDER`, if set
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the variable names an unknown provider
    pub fn from_env() -> AppResult<Option<Self>> {
        match env::var(Self::ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse().map(Some),
            _ => Ok(None),
        }
    }
}

impl Display for AiProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiProviderId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == id)
            .ok_or_else(|| {
                AppError::config(format!("Provider \"{}\" is not available", s.trim()))
                    .with_provider(s.trim())
            })
    }
}
