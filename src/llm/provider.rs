// ABOUTME: Unified AI provider selector for runtime provider switching
// ABOUTME: Closed enum over the OpenAI, Anthropic, Gemini and Ollama adapters built from settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # AI Provider Selector
//!
//! [`ChatProvider`] wraps exactly one of the four adapters. Every identifier in
//! [`AiProviderId`] maps to an adapter, so selection cannot fail; a missing API
//! key surfaces on the first call instead.

use std::fmt;

use async_trait::async_trait;
use gut_tracker_core::errors::AppResult;
use reqwest::Client;
use tracing::debug;

use super::{
    AiCapabilities, AiProvider, AnthropicProvider, GeminiProvider, OllamaProvider,
    OpenAiProvider,
};
use crate::config::{AiProviderId, AiSettings};

/// Unified chat provider that wraps one adapter
pub enum ChatProvider {
    /// `OpenAI` chat completions
    OpenAi(OpenAiProvider),
    /// Anthropic messages
    Anthropic(AnthropicProvider),
    /// Google Gemini
    Gemini(GeminiProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
}

impl ChatProvider {
    /// Adapter for the provider selected in `settings`
    #[must_use]
    pub fn from_settings(settings: &AiSettings) -> Self {
        Self::for_id(settings.selected_provider, settings)
    }

    /// Adapter for `id`, configured from `settings`
    #[must_use]
    pub fn for_id(id: AiProviderId, settings: &AiSettings) -> Self {
        let provider_settings = settings.providers.get(id).clone();
        debug!(provider = %id, model = %provider_settings.model, "selecting AI provider");
        match id {
            AiProviderId::OpenAi => Self::OpenAi(OpenAiProvider::new(provider_settings)),
            AiProviderId::Anthropic => {
                Self::Anthropic(AnthropicProvider::new(provider_settings))
            }
            AiProviderId::Gemini => Self::Gemini(GeminiProvider::new(provider_settings)),
            AiProviderId::Ollama => Self::Ollama(OllamaProvider::new(provider_settings)),
        }
    }

    /// Replace the HTTP client of the wrapped adapter
    #[must_use]
    pub fn with_client(self, client: Client) -> Self {
        match self {
            Self::OpenAi(p) => Self::OpenAi(p.with_client(client)),
            Self::Anthropic(p) => Self::Anthropic(p.with_client(client)),
            Self::Gemini(p) => Self::Gemini(p.with_client(client)),
            Self::Ollama(p) => Self::Ollama(p.with_client(client)),
        }
    }

    fn inner(&self) -> &dyn AiProvider {
        match self {
            Self::OpenAi(p) => p,
            Self::Anthropic(p) => p,
            Self::Gemini(p) => p,
            Self::Ollama(p) => p,
        }
    }
}

#[async_trait]
impl AiProvider for ChatProvider {
    fn id(&self) -> AiProviderId {
        self.inner().id()
    }

    fn capabilities(&self) -> AiCapabilities {
        self.inner().capabilities()
    }

    fn model(&self) -> &str {
        self.inner().model()
    }

    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> AppResult<String> {
        match self {
            Self::OpenAi(p) => p.complete(prompt, system_prompt).await,
            Self::Anthropic(p) => p.complete(prompt, system_prompt).await,
            Self::Gemini(p) => p.complete(prompt, system_prompt).await,
            Self::Ollama(p) => p.complete(prompt, system_prompt).await,
        }
    }

    async fn analyze_image(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> AppResult<String> {
        match self {
            Self::OpenAi(p) => p.analyze_image(image_base64, prompt, mime_type).await,
            Self::Anthropic(p) => p.analyze_image(image_base64, prompt, mime_type).await,
            Self::Gemini(p) => p.analyze_image(image_base64, prompt, mime_type).await,
            Self::Ollama(p) => p.analyze_image(image_base64, prompt, mime_type).await,
        }
    }
}

impl fmt::Debug for ChatProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi(p) => f.debug_tuple("ChatProvider::OpenAi").field(p).finish(),
            Self::Anthropic(p) => f.debug_tuple("ChatProvider::Anthropic").field(p).finish(),
            Self::Gemini(p) => f.debug_tuple("ChatProvider::Gemini").field(p).finish(),
            Self::Ollama(p) => f.debug_tuple("ChatProvider::Ollama").field(p).finish(),
        }
    }
}
