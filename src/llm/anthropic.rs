// ABOUTME: Anthropic messages API provider with vision support
// ABOUTME: x-api-key authentication, top-level system prompt and base64 image blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Anthropic Provider
//!
//! Implementation of the `AiProvider` trait for the Anthropic messages API
//! (`POST {base}/messages`). The system prompt is a top-level field; images are
//! base64 `image` blocks placed before the text block.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use gut_tracker_core::constants::ai::{
    ANTHROPIC_API_VERSION, ANTHROPIC_BASE_URL, CLOUD_MAX_ATTEMPTS, MAX_OUTPUT_TOKENS,
};
use gut_tracker_core::errors::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::http_client::shared_client;
use super::transport::{empty_answer, parse_envelope, send_with_retry, success_body};
use super::{AiCapabilities, AiProvider, MessageRole};
use crate::config::{AiProviderId, ProviderSettings};

const API_KEY_HEADER: &str = "x-api-key";
const VERSION_HEADER: &str = "anthropic-version";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: AnthropicContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AnthropicContent<'a> {
    Text(&'a str),
    Blocks(Vec<AnthropicBlock<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum AnthropicBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponseBlock {
    text: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Anthropic messages provider
pub struct AnthropicProvider {
    settings: ProviderSettings,
    client: Client,
}

impl AnthropicProvider {
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
            .unwrap_or(ANTHROPIC_BASE_URL);
        format!("{}/{endpoint}", base.trim_end_matches('/'))
    }

    fn api_key(&self) -> AppResult<&str> {
        self.settings.usable_api_key().ok_or_else(|| {
            AppError::missing_api_key(AiProviderId::Anthropic.as_str(), self.display_name())
        })
    }

    async fn send(
        &self,
        system: Option<&str>,
        content: AnthropicContent<'_>,
    ) -> AppResult<String> {
        let api_key = self.api_key()?;
        let request = AnthropicRequest {
            model: &self.settings.model,
            max_tokens: MAX_OUTPUT_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: MessageRole::User.as_str(),
                content,
            }],
        };
        let url = self.api_url("messages");

        debug!("Sending request to Anthropic API");

        let response = send_with_retry(AiProviderId::Anthropic, CLOUD_MAX_ATTEMPTS, || {
            self.client
                .post(&url)
                .header(API_KEY_HEADER, api_key)
                .header(VERSION_HEADER, ANTHROPIC_API_VERSION)
                .json(&request)
        })
        .await?;
        let body = success_body(AiProviderId::Anthropic, response).await?;

        let envelope: AnthropicResponse = parse_envelope(AiProviderId::Anthropic, &body)?;
        envelope
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| empty_answer(AiProviderId::Anthropic))
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    fn id(&self) -> AiProviderId {
        AiProviderId::Anthropic
    }

    fn capabilities(&self) -> AiCapabilities {
        AiCapabilities::cloud_vision()
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    #[instrument(skip(self, prompt, system_prompt), fields(model = %self.settings.model))]
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> AppResult<String> {
        self.send(system_prompt, AnthropicContent::Text(prompt)).await
    }

    #[instrument(skip(self, image_base64, prompt), fields(model = %self.settings.model))]
    async fn analyze_image(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> AppResult<String> {
        let blocks = vec![
            AnthropicBlock::Image {
                source: ImageSource {
                    source_type: "base64",
                    media_type: mime_type,
                    data: image_base64,
                },
            },
            AnthropicBlock::Text { text: prompt },
        ];
        self.send(None, AnthropicContent::Blocks(blocks)).await
    }
}

impl Debug for AnthropicProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnthropicProvider")
            .field("model", &self.settings.model)
            .field("base_url", &self.settings.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
