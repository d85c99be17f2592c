// ABOUTME: OpenAI chat completions provider with vision support
// ABOUTME: Bearer authentication, data-URL image parts and a single transport retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI` Provider
//!
//! Implementation of the `AiProvider` trait for the `OpenAI` chat completions API
//! (`POST {base}/chat/completions`). Images travel as `data:` URLs in an
//! `image_url` content part placed before the text part.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use gut_tracker_core::constants::ai::{CLOUD_MAX_ATTEMPTS, MAX_OUTPUT_TOKENS, OPENAI_BASE_URL};
use gut_tracker_core::errors::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::http_client::shared_client;
use super::transport::{empty_answer, parse_envelope, send_with_retry, success_body};
use super::{AiCapabilities, AiProvider, MessageRole};
use crate::config::{AiProviderId, ProviderSettings};

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: OpenAiContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OpenAiContent<'a> {
    Text(&'a str),
    Parts(Vec<OpenAiContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OpenAiContentPart<'a> {
    ImageUrl { image_url: ImageUrl },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI` chat completions provider
pub struct OpenAiProvider {
    settings: ProviderSettings,
    client: Client,
}

impl OpenAiProvider {
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
        let base = self.settings.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
        format!("{}/{endpoint}", base.trim_end_matches('/'))
    }

    fn api_key(&self) -> AppResult<&str> {
        self.settings.usable_api_key().ok_or_else(|| {
            AppError::missing_api_key(AiProviderId::OpenAi.as_str(), self.display_name())
        })
    }

    async fn send(&self, messages: Vec<OpenAiMessage<'_>>) -> AppResult<String> {
        let api_key = self.api_key()?;
        let request = OpenAiRequest {
            model: &self.settings.model,
            messages,
            max_tokens: MAX_OUTPUT_TOKENS,
        };
        let url = self.api_url("chat/completions");

        debug!("Sending request to OpenAI API");

        let response = send_with_retry(AiProviderId::OpenAi, CLOUD_MAX_ATTEMPTS, || {
            self.client.post(&url).bearer_auth(api_key).json(&request)
        })
        .await?;
        let body = success_body(AiProviderId::OpenAi, response).await?;

        let envelope: OpenAiResponse = parse_envelope(AiProviderId::OpenAi, &body)?;
        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| empty_answer(AiProviderId::OpenAi))
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn id(&self) -> AiProviderId {
        AiProviderId::OpenAi
    }

    fn capabilities(&self) -> AiCapabilities {
        AiCapabilities::cloud_vision()
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    #[instrument(skip(self, prompt, system_prompt), fields(model = %self.settings.model))]
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> AppResult<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(OpenAiMessage {
                role: MessageRole::System.as_str(),
                content: OpenAiContent::Text(system),
            });
        }
        messages.push(OpenAiMessage {
            role: MessageRole::User.as_str(),
            content: OpenAiContent::Text(prompt),
        });
        self.send(messages).await
    }

    #[instrument(skip(self, image_base64, prompt), fields(model = %self.settings.model))]
    async fn analyze_image(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> AppResult<String> {
        let messages = vec![OpenAiMessage {
            role: MessageRole::User.as_str(),
            content: OpenAiContent::Parts(vec![
                OpenAiContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{mime_type};base64,{image_base64}"),
                    },
                },
                OpenAiContentPart::Text { text: prompt },
            ]),
        }];
        self.send(messages).await
    }
}

impl Debug for OpenAiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiProvider")
            .field("model", &self.settings.model)
            .field("base_url", &self.settings.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
