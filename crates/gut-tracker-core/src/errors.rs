// ABOUTME: Unified error type shared by providers, the AI gateway, stores and analysis
// ABOUTME: Error codes, provider context (id, HTTP status) and quota classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every failure that crosses a module boundary is an [`AppError`]: a code from
//! the [`ErrorCode`] taxonomy, a human-readable message, and an [`ErrorContext`]
//! naming the AI provider involved (if any) and the HTTP status it returned.
//!
//! Callers branch on the code, never on the message text:
//!
//! - [`ErrorCode::ConfigError`]: missing credential or unknown provider
//! - [`ErrorCode::ExternalNetworkError`]: transport failure after the retry budget
//! - [`ErrorCode::ExternalAuthFailed`]: HTTP 401/403 from a provider
//! - [`ErrorCode::ExternalRateLimited`]: HTTP 429, see [`AppError::is_quota_error`]
//! - [`ErrorCode::ExternalServiceError`]: any other non-success status
//! - [`ErrorCode::MalformedAiOutput`]: model text unusable where structure is required

use std::error::Error as StdError;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// The provided input is invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A value is outside its permitted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// The requested record does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Provider answered with a non-success status
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Provider could not be reached
    #[serde(rename = "EXTERNAL_NETWORK_ERROR")]
    ExternalNetworkError = 5001,
    /// Provider rejected the credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// Provider quota or rate limit reached
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,
    /// Provider answered 2xx but the envelope or text is unusable
    #[serde(rename = "MALFORMED_AI_OUTPUT")]
    MalformedAiOutput = 5004,

    // Configuration (6000-6999)
    /// Configuration error (missing key, unknown provider)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Persistence layer failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Serialization or deserialization failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested record was not found",
            Self::ExternalServiceError => "The AI provider returned an error",
            Self::ExternalNetworkError => "The AI provider could not be reached",
            Self::ExternalAuthFailed => {
                "The AI provider rejected the API key, check the AI settings"
            }
            Self::ExternalRateLimited => "The AI provider quota or rate limit was exceeded",
            Self::MalformedAiOutput => "The AI provider returned an unusable answer",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the failure came from talking to an AI provider
    #[must_use]
    pub const fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalNetworkError
                | Self::ExternalAuthFailed
                | Self::ExternalRateLimited
                | Self::MalformedAiOutput
        )
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Provider id (`openai`, `anthropic`, `gemini`, `ollama`) when a provider is involved
    pub provider: Option<String>,
    /// HTTP status returned by the provider
    pub status: Option<u16>,
    /// Additional key-value context
    pub details: Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            provider: None,
            status: None,
            details: Value::Object(Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach the provider id
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.context.provider = Some(provider.into());
        self
    }

    /// Attach the HTTP status returned by the provider
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.context.status = Some(status);
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Provider id attached to this error, if any
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.context.provider.as_deref()
    }

    /// HTTP status attached to this error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.context.status
    }

    /// True when the provider reported a quota or rate limit (HTTP 429)
    ///
    /// Callers use this to suggest switching provider or waiting rather than
    /// fixing credentials.
    #[must_use]
    pub fn is_quota_error(&self) -> bool {
        self.code == ErrorCode::ExternalRateLimited
    }

    /// Message suitable for display, prefixed with the provider id when known
    #[must_use]
    pub fn user_message(&self) -> String {
        match (self.code.is_provider_error() || self.code == ErrorCode::ConfigError)
            .then_some(self.provider())
            .flatten()
        {
            Some(provider) => format!("[{provider}] {}", self.message),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Missing credential for a provider that requires one
    #[must_use]
    pub fn missing_api_key(provider: &str, display_name: &str) -> Self {
        Self::config(format!("{display_name} API key is missing")).with_provider(provider)
    }

    /// Transport failure (after retries where applicable)
    #[must_use]
    pub fn network(provider: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalNetworkError, message).with_provider(provider)
    }

    /// Credentials rejected (HTTP 401/403)
    #[must_use]
    pub fn auth_invalid(provider: &str, status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalAuthFailed, message)
            .with_provider(provider)
            .with_status(status)
    }

    /// Quota or rate limit reached (HTTP 429)
    #[must_use]
    pub fn quota_exceeded(provider: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalRateLimited, message)
            .with_provider(provider)
            .with_status(429)
    }

    /// Any other non-success provider status
    #[must_use]
    pub fn provider_status(provider: &str, status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message)
            .with_provider(provider)
            .with_status(status)
    }

    /// Provider answered but the answer cannot be used
    #[must_use]
    pub fn malformed_output(provider: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedAiOutput, message).with_provider(provider)
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside its permitted range
    #[must_use]
    pub fn out_of_range(field: &str, value: impl fmt::Display, range: &str) -> Self {
        Self::new(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be within {range}, got {value}"),
        )
    }

    /// Record not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string()).with_source(error)
    }
}

/// Conversion from `anyhow::Error` to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => Self::new(ErrorCode::InternalError, error.to_string())
                .with_details(serde_json::json!({ "source": source.to_string() })),
            None => Self::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}
