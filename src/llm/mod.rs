// ABOUTME: AI provider abstraction layer over OpenAI, Anthropic, Gemini and Ollama
// ABOUTME: Defines the uniform text-completion and image-analysis contract every adapter implements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # AI Provider Interface
//!
//! Every provider adapter turns a uniform "complete text" or "analyze image"
//! request into one HTTP call and returns the assistant's raw text.
//!
//! ## Key Concepts
//!
//! - **`AiCapabilities`**: Bitflags describing provider features (vision, system prompts)
//! - **`AiProvider`**: Async trait implemented by each adapter and by [`ChatProvider`]
//! - **`ChatProvider`**: Closed enum over the four adapters, built from [`AiSettings`]
//!
//! ## Behaviour shared by all adapters
//!
//! - an empty API key where one is required fails with a configuration error before any I/O
//! - cloud adapters resend once after a transport failure; the local adapter never retries
//! - 429 is a quota error, 401/403 an authentication error, other non-2xx a provider error
//!
//! ## Example
//!
//! ```rust,no_run
//! use gut_tracker::config::AiSettings;
//! use gut_tracker::llm::{AiProvider, ChatProvider};
//!
//! async fn example(settings: &AiSettings) {
//!     let provider = ChatProvider::from_settings(settings);
//!     let answer = provider.complete("List three low-FODMAP fruits", None).await;
//! }
//! ```
//!
//! [`AiSettings`]: crate::config::AiSettings

mod anthropic;
mod gemini;
/// Shared HTTP client
pub mod http_client;
/// JSON extraction from model text
pub mod json_extract;
mod ollama;
mod openai;
/// Fixed prompts
pub mod prompts;
mod provider;
/// Retry policy and status classification
pub mod transport;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use json_extract::{extract_json, JsonExtraction};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use provider::ChatProvider;

use async_trait::async_trait;
use gut_tracker_core::errors::AppResult;
use serde::{Deserialize, Serialize};

use crate::config::AiProviderId;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// Provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AiCapabilities: u8 {
        /// Provider accepts image input
        const VISION = 0b0000_0001;
        /// Provider accepts a separate system prompt
        const SYSTEM_MESSAGES = 0b0000_0010;
        /// Provider runs locally at no cost
        const FREE = 0b0000_0100;
    }
}

impl AiCapabilities {
    /// Capabilities of a paid cloud vision model
    #[must_use]
    pub const fn cloud_vision() -> Self {
        Self::VISION.union(Self::SYSTEM_MESSAGES)
    }

    /// Capabilities of a local vision model
    #[must_use]
    pub const fn local_vision() -> Self {
        Self::cloud_vision().union(Self::FREE)
    }

    /// Check if vision is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }

    /// Check if system prompts are supported
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }

    /// Check if the provider is free to use
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.contains(Self::FREE)
    }
}

// ============================================================================
// Message Roles
// ============================================================================

/// Role of a chat message in `OpenAI`-style and Ollama payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// AI provider contract
///
/// Implementations are single-turn: one optional system prompt, one user turn,
/// and the raw assistant text back.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> AiProviderId;

    /// Human-readable display name
    fn display_name(&self) -> &'static str {
        self.id().display_name()
    }

    /// Provider capabilities
    fn capabilities(&self) -> AiCapabilities;

    /// Whether the provider accepts images
    fn supports_vision(&self) -> bool {
        self.capabilities().supports_vision()
    }

    /// Whether the provider is free to use
    fn is_free(&self) -> bool {
        self.capabilities().is_free()
    }

    /// Model used for requests
    fn model(&self) -> &str;

    /// Single-turn chat completion returning the assistant's raw text
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> AppResult<String>;

    /// One image part plus one text part, returning the assistant's raw text
    async fn analyze_image(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> AppResult<String>;
}
