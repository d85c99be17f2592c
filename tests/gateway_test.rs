// ABOUTME: Integration tests for the AI gateway and the dictation parser
// ABOUTME: JSON fallbacks, busy-flag lifecycle, provider selection and error propagation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, stub_gateway, StubProvider};
use gut_tracker::config::{AiProviderId, AiSettings, ProviderSettings};
use gut_tracker::errors::{AppError, ErrorCode};
use gut_tracker::gateway::AiGateway;
use gut_tracker::llm::prompts::{FODMAP_SYSTEM_PROMPT, FOOD_RECOGNITION_PROMPT};
use gut_tracker::models::{FodmapLevel, MealType, VoiceContext, VoiceParseData};
use gut_tracker::voice::VoiceEntryParser;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Food Recognition
// =============================================================================

#[tokio::test]
async fn test_recognize_food_parses_fenced_json() {
    init_test_logging();
    let stub = StubProvider::answering(
        "Here you go:\n```json\n{\"foods\":[{\"name\":\"Poireau\",\"confidence\":0.9,\"quantity\":\"100g\"}],\"uncertain\":[\"sauce\"]}\n```",
    );
    let gateway = stub_gateway(&stub);

    let result = gateway.recognize_food("AAAA", "image/jpeg").await.unwrap();

    assert_eq!(result.foods.len(), 1);
    assert_eq!(result.foods[0].name, "Poireau");
    assert_eq!(result.foods[0].quantity.as_deref(), Some("100g"));
    assert_eq!(result.uncertain, vec!["sauce".to_owned()]);
    assert_eq!(stub.prompts()[0].prompt, FOOD_RECOGNITION_PROMPT);
}

#[tokio::test]
async fn test_recognize_food_without_json_returns_empty_result() {
    let stub = StubProvider::answering("I cannot see any food in this picture.");
    let gateway = stub_gateway(&stub);

    let result = gateway.recognize_food("AAAA", "image/jpeg").await.unwrap();

    assert!(result.foods.is_empty());
    assert!(result.uncertain.is_empty());
}

#[tokio::test]
async fn test_recognize_food_with_wrong_shape_returns_empty_result() {
    let stub = StubProvider::answering("{\"foods\": \"rice\"}");
    let gateway = stub_gateway(&stub);

    let result = gateway.recognize_food("AAAA", "image/jpeg").await.unwrap();

    assert!(result.foods.is_empty());
}

#[tokio::test]
async fn test_recognize_food_propagates_quota_error() {
    let stub = StubProvider::failing(|| AppError::quota_exceeded("openai", "OpenAI quota exceeded"));
    let gateway = stub_gateway(&stub);

    let error = gateway.recognize_food("AAAA", "image/jpeg").await.unwrap_err();

    assert!(error.is_quota_error());
}

// =============================================================================
// FODMAP Analysis
// =============================================================================

#[tokio::test]
async fn test_analyze_fodmap_parses_result_and_lists_foods() {
    let stub = StubProvider::answering(
        r#"{"foods":[{"name":"Poireau","fodmapLevel":"high","score":8,"mainFodmaps":["fructans"],"notes":"white part"}],"globalScore":7,"globalLevel":"high","advice":"Swap for leek greens"}"#,
    );
    let gateway = stub_gateway(&stub);

    let result = gateway
        .analyze_fodmap(&["Poireau".to_owned(), "Riz".to_owned()])
        .await
        .unwrap();

    assert_eq!(result.global_level, Some(FodmapLevel::High));
    assert_eq!(result.find("poireau").unwrap().main_fodmaps, vec!["fructans"]);
    let prompt = &stub.prompts()[0];
    assert!(prompt.prompt.contains("Poireau"));
    assert!(prompt.prompt.contains("Riz"));
    assert_eq!(prompt.system_prompt.as_deref(), Some(FODMAP_SYSTEM_PROMPT));
}

#[tokio::test]
async fn test_analyze_fodmap_without_json_keeps_text_as_advice() {
    let stub = StubProvider::answering("Leeks are high in fructans; keep portions small.");
    let gateway = stub_gateway(&stub);

    let result = gateway.analyze_fodmap(&["Poireau".to_owned()]).await.unwrap();

    assert!(result.foods.is_empty());
    assert_eq!(result.global_level, None);
    assert_eq!(result.global_score, None);
    assert!(result.global_estimate().is_none());
    assert_eq!(result.advice, "Leeks are high in fructans; keep portions small.");
}

// =============================================================================
// Busy Flag
// =============================================================================

#[tokio::test]
async fn test_busy_flag_is_set_only_during_calls() {
    let stub = StubProvider::answering("{}");
    let gateway = stub_gateway(&stub);

    assert!(!gateway.is_busy());
    gateway.recognize_food("AAAA", "image/png").await.unwrap();
    assert!(!gateway.is_busy());
    gateway.analyze_fodmap(&["Riz".to_owned()]).await.unwrap();
    gateway
        .parse_voice_transcript("du riz", VoiceContext::Food)
        .await
        .unwrap();
    gateway.analyze_correlations("{}").await.unwrap();
    assert!(!gateway.is_busy());

    assert_eq!(stub.busy_seen(), vec![true, true, true, true]);
}

#[tokio::test]
async fn test_busy_flag_cleared_after_failure() {
    let stub = StubProvider::failing(|| AppError::network("openai", "OpenAI network error"));
    let gateway = stub_gateway(&stub);

    let error = gateway.analyze_correlations("{}").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalNetworkError);
    assert_eq!(stub.busy_seen(), vec![true]);
    assert!(!gateway.is_busy());
}

// =============================================================================
// Provider Selection
// =============================================================================

#[test]
fn test_select_provider_rejects_unknown_id() {
    let gateway = AiGateway::new(AiSettings::default());

    let error = gateway.select_provider("mistral").unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigError);
    assert_eq!(gateway.active_provider_id(), AiProviderId::OpenAi);
}

#[test]
fn test_select_provider_switches_active_provider() {
    let gateway = AiGateway::new(AiSettings::default());

    let selected = gateway.select_provider("Gemini").unwrap();

    assert_eq!(selected, AiProviderId::Gemini);
    assert_eq!(gateway.active_provider_id(), AiProviderId::Gemini);
    assert_eq!(gateway.settings().selected_provider, AiProviderId::Gemini);
}

#[tokio::test]
async fn test_gateway_uses_settings_changed_between_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": { "content": "{\"foods\":[{\"name\":\"Riz\",\"confidence\":0.8}],\"uncertain\":[]}" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = AiGateway::new(AiSettings::default());
    let missing_key = gateway.recognize_food("AAAA", "image/png").await.unwrap_err();
    assert_eq!(missing_key.code, ErrorCode::ConfigError);
    assert_eq!(missing_key.provider(), Some("openai"));

    let mut settings = gateway.settings();
    settings.selected_provider = AiProviderId::Ollama;
    settings.providers.ollama = ProviderSettings::with_model("llava").base_url(server.uri());
    gateway.set_settings(settings);

    let result = gateway.recognize_food("AAAA", "image/png").await.unwrap();
    assert_eq!(result.foods[0].name, "Riz");
}

// =============================================================================
// Voice Parsing
// =============================================================================

#[tokio::test]
async fn test_voice_food_transcript_is_structured() {
    let stub = StubProvider::answering(
        r#"{"mealType":"dinner","foods":[{"name":"pâtes","quantity":"une assiette"},{"name":"parmesan","quantity":null}],"notes":null}"#,
    );
    let parser = VoiceEntryParser::new(stub_gateway(&stub));

    let result = parser
        .parse("  une assiette de pâtes au parmesan ce soir ", VoiceContext::Food)
        .await
        .unwrap();

    assert_eq!(result.transcript, "une assiette de pâtes au parmesan ce soir");
    let VoiceParseData::Food(food) = result.data else {
        panic!("expected food data");
    };
    assert_eq!(food.meal_type, Some(MealType::Dinner));
    assert_eq!(food.foods.len(), 2);
    assert_eq!(stub.prompts()[0].prompt, "une assiette de pâtes au parmesan ce soir");
}

#[tokio::test]
async fn test_voice_medication_without_json_is_empty() {
    let stub = StubProvider::answering("Sorry, I did not catch that.");
    let parser = VoiceEntryParser::new(stub_gateway(&stub));

    let result = parser
        .parse("j'ai pris un truc", VoiceContext::Medication)
        .await
        .unwrap();

    assert!(matches!(result.data, VoiceParseData::Medication(_)));
    assert!(result.data.is_empty());
}

#[tokio::test]
async fn test_voice_blank_transcript_is_rejected_before_any_call() {
    let stub = StubProvider::answering("{}");
    let parser = VoiceEntryParser::new(stub_gateway(&stub));

    let error = parser.parse("   ", VoiceContext::Symptom).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert!(stub.prompts().is_empty());
}
