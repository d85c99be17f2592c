// ABOUTME: Ollama local chat provider with vision support
// ABOUTME: Keyless /api/chat calls, non-streaming, images as raw base64 on the user message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ollama Provider
//!
//! Implementation of the `AiProvider` trait for a local Ollama server
//! (`POST {base}/api/chat`). No API key is needed and a failed connection is
//! reported immediately without a retry.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use gut_tracker_core::constants::ai::{LOCAL_MAX_ATTEMPTS, OLLAMA_DEFAULT_BASE_URL};
use gut_tracker_core::errors::AppResult;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::http_client::shared_client;
use super::transport::{empty_answer, parse_envelope, send_with_retry, success_body};
use super::{AiCapabilities, AiProvider, MessageRole};
use crate::config::{AiProviderId, ProviderSettings};

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<&'a str>>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: Option<OllamaResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: Option<String>,
}

/// Local Ollama provider
pub struct OllamaProvider {
    settings: ProviderSettings,
    client: Client,
}

impl OllamaProvider {
    /// Create a provider using the shared HTTP client
    #[must_use]
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            client: shared_client().clone(),
        }
    }

    /// Use a specific HTTP client
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn api_url(&self, endpoint: &str) -> String {
        let base = self
            .settings
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(OLLAMA_DEFAULT_BASE_URL);
        format!("{}/{endpoint}", base.trim_end_matches('/'))
    }

    async fn send(&self, messages: Vec<OllamaMessage<'_>>) -> AppResult<String> {
        let request = OllamaRequest {
            model: &self.settings.model,
            messages,
            stream: false,
        };
        let url = self.api_url("api/chat");

        debug!(url = %url, "Sending request to Ollama");

        let response = send_with_retry(AiProviderId::Ollama, LOCAL_MAX_ATTEMPTS, || {
            self.client.post(&url).json(&request)
        })
        .await?;
        let body = success_body(AiProviderId::Ollama, response).await?;

        let envelope: OllamaResponse = parse_envelope(AiProviderId::Ollama, &body)?;
        envelope
            .message
            .and_then(|message| message.content)
            .ok_or_else(|| empty_answer(AiProviderId::Ollama))
    }
}

#[async_trait]
impl AiProvider for OllamaProvider {
    fn id(&self) -> AiProviderId {
        AiProviderId::Ollama
    }

    fn capabilities(&self) -> AiCapabilities {
        AiCapabilities::local_vision()
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    #[instrument(skip(self, prompt, system_prompt), fields(model = %self.settings.model))]
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> AppResult<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(OllamaMessage {
                role: MessageRole::System.as_str(),
                content: system,
                images: None,
            });
        }
        messages.push(OllamaMessage {
            role: MessageRole::User.as_str(),
            content: prompt,
            images: None,
        });
        self.send(messages).await
    }

    /// Ollama infers the image format itself, so `mime_type` is unused
    #[instrument(skip(self, image_base64, prompt), fields(model = %self.settings.model))]
    async fn analyze_image(
        &self,
        image_base64: &str,
        prompt: &str,
        _mime_type: &str,
    ) -> AppResult<String> {
        let messages = vec![OllamaMessage {
            role: MessageRole::User.as_str(),
            content: prompt,
            images: Some(vec![image_base64]),
        }];
        self.send(messages).await
    }
}

impl Debug for OllamaProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OllamaProvider")
            .field("model", &self.settings.model)
            .field("base_url", &self.settings.base_url)
            .finish_non_exhaustive()
    }
}
