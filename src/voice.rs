// ABOUTME: Turns dictated transcripts into structured journal data
// ABOUTME: Gateway dictation call plus JSON extraction with an empty per-context fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use gut_tracker_core::errors::{AppError, AppResult};
use gut_tracker_core::models::{
    VoiceContext, VoiceFoodResult, VoiceMedicationResult, VoiceParseData, VoiceParseResult,
    VoiceSymptomResult,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::gateway::AiGateway;
use crate::llm::{extract_json, JsonExtraction};

/// Parser for dictated entries
#[derive(Debug, Clone)]
pub struct VoiceEntryParser {
    gateway: Arc<AiGateway>,
}

impl VoiceEntryParser {
    /// Parser using `gateway`
    #[must_use]
    pub const fn new(gateway: Arc<AiGateway>) -> Self {
        Self { gateway }
    }

    /// Parse `transcript` for `context`
    ///
    /// An answer without usable JSON yields the empty result for the context.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a blank transcript, or the gateway's
    /// error unchanged
    pub async fn parse(
        &self,
        transcript: &str,
        context: VoiceContext,
    ) -> AppResult<VoiceParseResult> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(AppError::invalid_input("transcript is empty"));
        }

        let raw = self
            .gateway
            .parse_voice_transcript(transcript, context)
            .await?;
        let data = parse_voice_data(&raw, context);
        debug!(context = %context, empty = data.is_empty(), "dictation parsed");

        Ok(VoiceParseResult {
            context,
            transcript: transcript.to_owned(),
            data,
        })
    }
}

/// Structured data for `context` from a raw model answer
#[must_use]
pub fn parse_voice_data(raw: &str, context: VoiceContext) -> VoiceParseData {
    match context {
        VoiceContext::Food => extract_or_empty::<VoiceFoodResult>(raw, context)
            .map_or_else(|| VoiceParseData::empty(context), VoiceParseData::Food),
        VoiceContext::Symptom => extract_or_empty::<VoiceSymptomResult>(raw, context)
            .map_or_else(|| VoiceParseData::empty(context), VoiceParseData::Symptom),
        VoiceContext::Medication => extract_or_empty::<VoiceMedicationResult>(raw, context)
            .map_or_else(|| VoiceParseData::empty(context), VoiceParseData::Medication),
    }
}

fn extract_or_empty<T: DeserializeOwned>(raw: &str, context: VoiceContext) -> Option<T> {
    match extract_json::<T>(raw) {
        JsonExtraction::Extracted(value) => Some(value),
        JsonExtraction::NotFound => {
            warn!(context = %context, "dictation answer holds no JSON");
            None
        }
        JsonExtraction::Invalid(reason) => {
            warn!(context = %context, reason = %reason, "dictation JSON rejected");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use gut_tracker_core::models::{MealType, SymptomType};

    #[test]
    fn test_food_answer_parsed() {
        let raw = r#"Sure! {"mealType":"lunch","foods":[{"name":"Riz","quantity":"200 g"}]}"#;
        match parse_voice_data(raw, VoiceContext::Food) {
            VoiceParseData::Food(food) => {
                assert_eq!(food.meal_type, Some(MealType::Lunch));
                assert_eq!(food.foods[0].name, "Riz");
            }
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_symptom_severity_defaults() {
        let raw = r#"{"symptoms":[{"type":"bloating"}]}"#;
        let VoiceParseData::Symptom(result) = parse_voice_data(raw, VoiceContext::Symptom) else {
            panic!("expected symptom data");
        };
        assert_eq!(result.symptoms[0].symptom_type, SymptomType::Bloating);
        assert_eq!(result.symptoms[0].severity.value(), 5);
    }

    #[test]
    fn test_prose_answer_is_empty() {
        let data = parse_voice_data("I could not understand.", VoiceContext::Medication);
        assert!(data.is_empty());
        assert_eq!(data, VoiceParseData::empty(VoiceContext::Medication));
    }
}
