// ABOUTME: Integration tests for environment configuration and persisted AI settings
// ABOUTME: Environment overlays, timeout parsing and the base64 settings file round trip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gut_tracker::config::environment::{DATA_DIR_ENV, HTTP_CONNECT_TIMEOUT_ENV, HTTP_TIMEOUT_ENV};
use gut_tracker::config::{AiProviderId, AiSettings, AppConfig, SettingsStore};
use gut_tracker::errors::ErrorCode;
use serial_test::serial;
use tempfile::TempDir;
use tokio::fs;

const APP_ENV_KEYS: [&str; 3] = [DATA_DIR_ENV, HTTP_TIMEOUT_ENV, HTTP_CONNECT_TIMEOUT_ENV];

fn clear_env() {
    for key in AiSettings::env_var_names().into_iter().chain(APP_ENV_KEYS) {
        env::remove_var(key);
    }
}

// =============================================================================
// Environment Overlay
// =============================================================================

#[test]
#[serial]
fn test_env_overrides_selection_and_provider_values() {
    clear_env();
    env::set_var("GUT_TRACKER_AI_PROVIDER", "ollama");
    env::set_var("OPENAI_API_KEY", "sk-env");
    env::set_var("ANTHROPIC_MODEL", "claude-env");
    env::set_var("OLLAMA_BASE_URL", "http://gpu-box:11434");

    let settings = AiSettings::from_env().unwrap();

    assert_eq!(settings.selected_provider, AiProviderId::Ollama);
    assert_eq!(settings.providers.openai.usable_api_key(), Some("sk-env"));
    assert_eq!(settings.providers.anthropic.model, "claude-env");
    assert_eq!(
        settings.selected().base_url.as_deref(),
        Some("http://gpu-box:11434")
    );
    clear_env();
}

#[test]
#[serial]
fn test_blank_env_values_are_ignored() {
    clear_env();
    env::set_var("OLLAMA_MODEL", "  ");
    env::set_var("GUT_TRACKER_AI_PROVIDER", "");

    let settings = AiSettings::from_env().unwrap();

    assert_eq!(settings, AiSettings::default());
    clear_env();
}

#[test]
#[serial]
fn test_env_var_names_cover_every_overlay() {
    let names = AiSettings::env_var_names();
    for key in ["ANTHROPIC_API_KEY", "GEMINI_API_KEY", "GEMINI_MODEL", "OPENAI_MODEL"] {
        assert!(names.contains(&key), "{key} missing");
    }

    for key in &names {
        let value = if *key == AiProviderId::ENV_VAR { "gemini" } else { "from-env" };
        env::set_var(key, value);
    }
    assert_ne!(AiSettings::from_env().unwrap(), AiSettings::default());

    clear_env();
    assert_eq!(AiSettings::from_env().unwrap(), AiSettings::default());
}

#[test]
#[serial]
fn test_unknown_provider_in_env_is_config_error() {
    clear_env();
    env::set_var("GUT_TRACKER_AI_PROVIDER", "mistral");

    let error = AiSettings::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.user_message().contains("mistral"));
    clear_env();
}

#[test]
#[serial]
fn test_app_config_reads_data_dir_and_timeouts() {
    clear_env();
    env::set_var("GUT_TRACKER_DATA_DIR", "/tmp/gut-tracker-test");
    env::set_var("GUT_TRACKER_HTTP_TIMEOUT_SECS", "30");

    let config = AppConfig::from_env().unwrap();

    assert_eq!(config.data_dir.to_str(), Some("/tmp/gut-tracker-test"));
    assert_eq!(config.http.timeout_secs, 30);
    assert_eq!(config.http.connect_timeout_secs, 10);
    assert!(config
        .settings_store()
        .path()
        .ends_with(SettingsStore::FILE_NAME));
    clear_env();
}

#[test]
#[serial]
fn test_non_positive_timeout_is_rejected() {
    clear_env();
    env::set_var("GUT_TRACKER_DATA_DIR", "/tmp/gut-tracker-test");
    env::set_var("GUT_TRACKER_HTTP_CONNECT_TIMEOUT_SECS", "0");

    let error = AppConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigError);
    clear_env();
}

// =============================================================================
// Settings Store
// =============================================================================

#[tokio::test]
async fn test_settings_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::in_dir(&dir.path().join("nested"));

    let mut settings = AiSettings::default();
    settings.selected_provider = AiProviderId::Gemini;
    settings.providers.gemini.api_key = Some("gm-key".to_owned());
    store.save(&settings).await.unwrap();

    let raw = fs::read_to_string(store.path()).await.unwrap();
    assert!(!raw.contains("gm-key"));
    let decoded = STANDARD.decode(raw.trim()).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
    assert_eq!(json["selectedProvider"], "gemini");

    assert_eq!(store.load().await, settings);
}

#[tokio::test]
async fn test_missing_or_garbled_settings_load_defaults() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    assert_eq!(store.load().await, AiSettings::default());

    fs::write(store.path(), "%%% not base64 %%%").await.unwrap();
    assert_eq!(store.load().await, AiSettings::default());

    fs::write(store.path(), STANDARD.encode("{\"selectedProvider\": 3}"))
        .await
        .unwrap();
    assert_eq!(store.load().await, AiSettings::default());
}

#[tokio::test]
async fn test_settings_naming_unknown_provider_load_defaults() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    fs::write(
        store.path(),
        STANDARD.encode(r#"{"selectedProvider":"mistral","providers":{}}"#),
    )
    .await
    .unwrap();

    let settings = store.load().await;

    assert_eq!(settings.selected_provider, AiProviderId::OpenAi);
}

#[tokio::test]
#[serial]
async fn test_app_config_overlays_env_on_stored_settings() {
    clear_env();
    let dir = TempDir::new().unwrap();
    env::set_var("GUT_TRACKER_DATA_DIR", dir.path());
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.data_dir, dir.path());

    let mut stored = AiSettings::default();
    stored.selected_provider = AiProviderId::Anthropic;
    stored.providers.openai.api_key = Some("sk-stored".to_owned());
    config.settings_store().save(&stored).await.unwrap();

    env::set_var("OPENAI_API_KEY", "sk-env");
    let effective = config.load_ai_settings().await.unwrap();
    clear_env();

    assert_eq!(effective.selected_provider, AiProviderId::Anthropic);
    assert_eq!(effective.providers.openai.usable_api_key(), Some("sk-env"));
}
