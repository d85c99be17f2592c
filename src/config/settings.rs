// ABOUTME: AI provider settings with per-provider credentials, models and endpoints
// ABOUTME: Defaults for every provider plus environment variable overlay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use gut_tracker_core::constants::ai::{
    ANTHROPIC_DEFAULT_MODEL, GEMINI_DEFAULT_MODEL, OLLAMA_DEFAULT_BASE_URL, OLLAMA_DEFAULT_MODEL,
    OPENAI_DEFAULT_MODEL,
};
use gut_tracker_core::errors::AppResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::AiProviderId;

/// Settings for a single provider
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    /// API key; empty or absent for keyless providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Endpoint override; the adapter's public endpoint when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderSettings {
    /// Settings with a model and nothing else
    #[must_use]
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            api_key: None,
            model: model.into(),
            base_url: None,
        }
    }

    /// Set the API key
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The API key when present and non-blank
    #[must_use]
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Debug for ProviderSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProviderSettings")
            .field(
                "api_key",
                &self.usable_api_key().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Settings for every known provider, keyed by provider id in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettingsMap {
    /// `OpenAI` settings
    #[serde(default = "default_openai")]
    pub openai: ProviderSettings,
    /// Anthropic settings
    #[serde(default = "default_anthropic")]
    pub anthropic: ProviderSettings,
    /// Gemini settings
    #[serde(default = "default_gemini")]
    pub gemini: ProviderSettings,
    /// Ollama settings
    #[serde(default = "default_ollama")]
    pub ollama: ProviderSettings,
}

fn default_openai() -> ProviderSettings {
    ProviderSettings::with_model(OPENAI_DEFAULT_MODEL)
}

fn default_anthropic() -> ProviderSettings {
    ProviderSettings::with_model(ANTHROPIC_DEFAULT_MODEL)
}

fn default_gemini() -> ProviderSettings {
    ProviderSettings::with_model(GEMINI_DEFAULT_MODEL)
}

fn default_ollama() -> ProviderSettings {
    ProviderSettings::with_model(OLLAMA_DEFAULT_MODEL).base_url(OLLAMA_DEFAULT_BASE_URL)
}

impl Default for ProviderSettingsMap {
    fn default() -> Self {
        Self {
            openai: default_openai(),
            anthropic: default_anthropic(),
            gemini: default_gemini(),
            ollama: default_ollama(),
        }
    }
}

impl ProviderSettingsMap {
    /// Settings for a provider
    #[must_use]
    pub const fn get(&self, id: AiProviderId) -> &ProviderSettings {
        match id {
            AiProviderId::OpenAi => &self.openai,
            AiProviderId::Anthropic => &self.anthropic,
            AiProviderId::Gemini => &self.gemini,
            AiProviderId::Ollama => &self.ollama,
        }
    }

    /// Mutable settings for a provider
    pub fn get_mut(&mut self, id: AiProviderId) -> &mut ProviderSettings {
        match id {
            AiProviderId::OpenAi => &mut self.openai,
            AiProviderId::Anthropic => &mut self.anthropic,
            AiProviderId::Gemini => &mut self.gemini,
            AiProviderId::Ollama => &mut self.ollama,
        }
    }
}

/// Environment variables overlaid on provider settings
struct ProviderEnvVars {
    id: AiProviderId,
    api_key: Option<&'static str>,
    model: &'static str,
    base_url: Option<&'static str>,
}

const PROVIDER_ENV_VARS: [ProviderEnvVars; 4] = [
    ProviderEnvVars {
        id: AiProviderId::OpenAi,
        api_key: Some("OPENAI_API_KEY"),
        model: "OPENAI_MODEL",
        base_url: None,
    },
    ProviderEnvVars {
        id: AiProviderId::Anthropic,
        api_key: Some("ANTHROPIC_API_KEY"),
        model: "ANTHROPIC_MODEL",
        base_url: None,
    },
    ProviderEnvVars {
        id: AiProviderId::Gemini,
        api_key: Some("GEMINI_API_KEY"),
        model: "GEMINI_MODEL",
        base_url: None,
    },
    ProviderEnvVars {
        id: AiProviderId::Ollama,
        api_key: None,
        model: "OLLAMA_MODEL",
        base_url: Some("OLLAMA_BASE_URL"),
    },
];

/// Active provider selection plus per-provider settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSettings {
    /// Provider used for every AI operation
    #[serde(default)]
    pub selected_provider: AiProviderId,
    /// Per-provider settings
    #[serde(default)]
    pub providers: ProviderSettingsMap,
}

impl AiSettings {
    /// Defaults overlaid with environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `GUT_TRACKER_AI_PROVIDER` names an unknown provider
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Overlay environment variables on these settings
    ///
    /// Unset or blank variables leave the current value untouched.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `GUT_TRACKER_AI_PROVIDER` names an unknown provider
    pub fn with_env_overrides(mut self) -> AppResult<Self> {
        if let Some(selected) = AiProviderId::from_env()? {
            self.selected_provider = selected;
        }

        for vars in &PROVIDER_ENV_VARS {
            let settings = self.providers.get_mut(vars.id);
            if let Some(api_key) = vars.api_key.and_then(non_blank_env) {
                settings.api_key = Some(api_key);
            }
            if let Some(model) = non_blank_env(vars.model) {
                settings.model = model;
            }
            if let Some(base_url) = vars.base_url.and_then(non_blank_env) {
                settings.base_url = Some(base_url);
            }
        }

        debug!(provider = %self.selected_provider, "AI settings resolved");
        Ok(self)
    }

    /// Every environment variable read by [`Self::with_env_overrides`]
    #[must_use]
    pub fn env_var_names() -> Vec<&'static str> {
        let mut names = vec![AiProviderId::ENV_VAR];
        for vars in &PROVIDER_ENV_VARS {
            names.extend(vars.api_key);
            names.push(vars.model);
            names.extend(vars.base_url);
        }
        names
    }

    /// Settings of the selected provider
    #[must_use]
    pub const fn selected(&self) -> &ProviderSettings {
        self.providers.get(self.selected_provider)
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AiSettings::default();
        assert_eq!(settings.selected_provider, AiProviderId::OpenAi);
        assert_eq!(settings.providers.openai.model, "gpt-4o");
        assert_eq!(settings.providers.anthropic.model, "claude-opus-4-6");
        assert_eq!(settings.providers.gemini.model, "gemini-1.5-pro");
        assert_eq!(settings.providers.ollama.model, "llava");
        assert_eq!(
            settings.providers.ollama.base_url.as_deref(),
            Some("http://localhost:11434")
        );
    }

    #[test]
    fn test_json_shape() {
        let settings = AiSettings::default();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["selectedProvider"], "openai");
        assert_eq!(value["providers"]["ollama"]["baseUrl"], "http://localhost:11434");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"selectedProvider":"anthropic","providers":{"anthropic":{"apiKey":"k","model":"claude"}}}"#;
        let settings: AiSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.selected_provider, AiProviderId::Anthropic);
        assert_eq!(settings.selected().usable_api_key(), Some("k"));
        assert_eq!(settings.providers.gemini.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = ProviderSettings::with_model("gpt-4o").api_key("sk-secret");
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
