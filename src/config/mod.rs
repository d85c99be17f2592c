// ABOUTME: Configuration management for data location, HTTP timeouts and AI providers
// ABOUTME: Environment-driven settings plus the persisted AI provider selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **environment**: `AppConfig` from environment variables
//! - **settings**: AI provider selection and per-provider settings
//! - **settings_store**: base64 JSON persistence of AI settings
//! - **types**: the `AiProviderId` enum

/// Environment configuration
pub mod environment;
/// AI provider settings
pub mod settings;
/// AI settings persistence
pub mod settings_store;
/// Shared configuration enums
pub mod types;

pub use environment::{AppConfig, HttpClientConfig};
pub use settings::{AiSettings, ProviderSettings, ProviderSettingsMap};
pub use settings_store::SettingsStore;
pub use types::AiProviderId;
