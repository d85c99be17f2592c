// ABOUTME: Google Gemini provider using the generateContent API
// ABOUTME: Key passed as query parameter, system_instruction field and inline_data image parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `AiProvider` trait for Google's Gemini models
//! (`POST {base}/models/{model}:generateContent?key=...`).

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use gut_tracker_core::constants::ai::{CLOUD_MAX_ATTEMPTS, GEMINI_BASE_URL, MAX_OUTPUT_TOKENS};
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
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    InlineData { inline_data: InlineData<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini provider
pub struct GeminiProvider {
    settings: ProviderSettings,
    client: Client,
}

impl GeminiProvider {
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

    /// Build the API URL for the configured model and a method
    fn build_url(&self, method: &str) -> String {
        let base = self.settings.base_url.as_deref().unwrap_or(GEMINI_BASE_URL);
        format!(
            "{}/models/{}:{method}",
            base.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn api_key(&self) -> AppResult<&str> {
        self.settings.usable_api_key().ok_or_else(|| {
            AppError::missing_api_key(AiProviderId::Gemini.as_str(), self.display_name())
        })
    }

    async fn send(
        &self,
        parts: Vec<GeminiPart<'_>>,
        system_prompt: Option<&str>,
    ) -> AppResult<String> {
        let api_key = self.api_key()?;
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: MessageRole::User.as_str(),
                parts,
            }],
            system_instruction: system_prompt.map(|text| GeminiSystemInstruction {
                parts: vec![GeminiPart::Text { text }],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };
        let url = self.build_url("generateContent");

        debug!("Sending request to Gemini API");

        let response = send_with_retry(AiProviderId::Gemini, CLOUD_MAX_ATTEMPTS, || {
            self.client
                .post(&url)
                .query(&[("key", api_key)])
                .json(&request)
        })
        .await?;
        let body = success_body(AiProviderId::Gemini, response).await?;

        let envelope: GeminiResponse = parse_envelope(AiProviderId::Gemini, &body)?;
        envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| empty_answer(AiProviderId::Gemini))
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    fn id(&self) -> AiProviderId {
        AiProviderId::Gemini
    }

    fn capabilities(&self) -> AiCapabilities {
        AiCapabilities::cloud_vision()
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    #[instrument(skip(self, prompt, system_prompt), fields(model = %self.settings.model))]
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> AppResult<String> {
        self.send(vec![GeminiPart::Text { text: prompt }], system_prompt)
            .await
    }

    #[instrument(skip(self, image_base64, prompt), fields(model = %self.settings.model))]
    async fn analyze_image(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> AppResult<String> {
        let parts = vec![
            GeminiPart::InlineData {
                inline_data: InlineData {
                    mime_type,
                    data: image_base64,
                },
            },
            GeminiPart::Text { text: prompt },
        ];
        self.send(parts, None).await
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("model", &self.settings.model)
            .field("base_url", &self.settings.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
