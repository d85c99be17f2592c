// ABOUTME: Request sending with the single-retry policy and HTTP status classification
// ABOUTME: Maps transport failures and non-success statuses onto provider-tagged AppErrors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gut_tracker_core::errors::{AppError, AppResult};
use reqwest::{Error as TransportError, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::config::AiProviderId;

/// Send a request, rebuilding and resending it after a transport failure
/// until `max_attempts` sends have been made
///
/// Only transport failures (connect, timeout, broken connection) are retried.
/// Any HTTP response, successful or not, ends the loop.
///
/// # Errors
///
/// Returns a network error once every attempt has failed
pub async fn send_with_retry<F>(
    provider: AiProviderId,
    max_attempts: u32,
    build_request: F,
) -> AppResult<Response>
where
    F: Fn() -> RequestBuilder + Send + Sync,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match build_request().send().await.map_err(TransportError::without_url) {
            Ok(response) => return Ok(response),
            Err(e) if attempt < max_attempts => {
                warn!(
                    provider = %provider,
                    attempt,
                    error = %e,
                    "transport failure, retrying"
                );
                attempt += 1;
            }
            Err(e) => {
                error!(provider = %provider, attempts = attempt, error = %e, "transport failure");
                return Err(network_error(provider, &e));
            }
        }
    }
}

/// `source` must already have its URL stripped, request URLs can carry API keys
fn network_error(provider: AiProviderId, source: &TransportError) -> AppError {
    let message = match provider {
        AiProviderId::Ollama => {
            "Ollama server unreachable, check that Ollama is running locally".to_owned()
        }
        other => format!("{} network error", other.display_name()),
    };
    AppError::network(provider.as_str(), message)
        .with_details(json!({ "cause": source.to_string() }))
}

/// Body of a successful response, or the classified error for any other status
///
/// # Errors
///
/// Returns the classified provider error for non-2xx statuses, or a network
/// error when the body cannot be read
pub async fn success_body(provider: AiProviderId, response: Response) -> AppResult<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| network_error(provider, &e.without_url()))?;

    if status.is_success() {
        debug!(provider = %provider, status = status.as_u16(), bytes = body.len(), "provider response received");
        return Ok(body);
    }

    error!(provider = %provider, status = status.as_u16(), "provider returned an error status");
    Err(classify_status(provider, status, &body))
}

/// Map a non-success status to the error taxonomy
///
/// 429 is a quota error, 401 and 403 are authentication errors, anything else
/// is a provider error carrying the status.
#[must_use]
pub fn classify_status(provider: AiProviderId, status: StatusCode, body: &str) -> AppError {
    let name = provider.display_name();
    let code = status.as_u16();
    let error = match code {
        429 => AppError::quota_exceeded(provider.as_str(), format!("{name} quota exceeded")),
        401 | 403 => {
            AppError::auth_invalid(provider.as_str(), code, format!("{name} API key is invalid"))
        }
        _ => AppError::provider_status(provider.as_str(), code, format!("{name} error {code}")),
    };

    match provider_error_message(body) {
        Some(detail) => error.with_details(json!({ "providerMessage": detail })),
        None => error,
    }
}

/// `{"error": {"message": ".."}}` (`OpenAI`, Anthropic, Gemini) or `{"error": ".."}` (Ollama)
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Message { message: String },
    Plain(String),
}

fn provider_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| match envelope.error {
            ErrorBody::Message { message } | ErrorBody::Plain(message) => message,
        })
}

/// Deserialize a provider envelope, reporting failures as malformed output
///
/// # Errors
///
/// Returns a malformed-output error when the body does not match `T`
pub fn parse_envelope<T: DeserializeOwned>(provider: AiProviderId, body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| {
        error!(provider = %provider, error = %e, "unexpected provider response shape");
        AppError::malformed_output(
            provider.as_str(),
            format!("{} returned an unexpected response", provider.display_name()),
        )
        .with_source(e)
    })
}

/// Missing-text error used when an envelope parses but holds no text
#[must_use]
pub fn empty_answer(provider: AiProviderId) -> AppError {
    AppError::malformed_output(
        provider.as_str(),
        format!("{} returned no text", provider.display_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gut_tracker_core::errors::ErrorCode;

    #[test]
    fn test_classify_statuses() {
        let quota = classify_status(AiProviderId::OpenAi, StatusCode::TOO_MANY_REQUESTS, "");
        assert!(quota.is_quota_error());
        assert_eq!(quota.provider(), Some("openai"));

        let auth = classify_status(AiProviderId::Gemini, StatusCode::FORBIDDEN, "");
        assert_eq!(auth.code, ErrorCode::ExternalAuthFailed);
        assert!(!auth.is_quota_error());
        assert_eq!(auth.status(), Some(403));

        let other = classify_status(AiProviderId::Anthropic, StatusCode::BAD_GATEWAY, "");
        assert_eq!(other.code, ErrorCode::ExternalServiceError);
        assert_eq!(other.status(), Some(502));
        assert_eq!(other.user_message(), "[anthropic] Anthropic error 502");
    }

    #[test]
    fn test_provider_message_extracted() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#;
        let error = classify_status(AiProviderId::OpenAi, StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(
            error.context.details["providerMessage"],
            "You exceeded your current quota"
        );

        let ollama = r#"{"error":"model 'llava' not found"}"#;
        assert_eq!(
            provider_error_message(ollama).as_deref(),
            Some("model 'llava' not found")
        );
    }
}
