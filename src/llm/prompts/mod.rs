// ABOUTME: Fixed prompts for food recognition, FODMAP scoring, dictation and analysis
// ABOUTME: Loaded at compile time from markdown files next to this module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts are kept in markdown files for easy maintenance. Every structured
//! prompt demands JSON-only output; the gateway still tolerates prose around it.

use gut_tracker_core::models::VoiceContext;

/// Photo recognition instructions, sent as the text part next to the image
pub const FOOD_RECOGNITION_PROMPT: &str = include_str!("food_recognition.md");

/// FODMAP scoring system prompt
pub const FODMAP_SYSTEM_PROMPT: &str = include_str!("fodmap.md");

/// Correlation narrative system prompt (medical disclaimer first)
pub const CORRELATION_ANALYSIS_SYSTEM_PROMPT: &str = include_str!("correlation_analysis.md");

/// Dictated meal system prompt
pub const VOICE_FOOD_SYSTEM_PROMPT: &str = include_str!("voice_food.md");

/// Dictated symptom system prompt
pub const VOICE_SYMPTOM_SYSTEM_PROMPT: &str = include_str!("voice_symptom.md");

/// Dictated medication system prompt
pub const VOICE_MEDICATION_SYSTEM_PROMPT: &str = include_str!("voice_medication.md");

/// System prompt for a dictation context
#[must_use]
pub const fn voice_system_prompt(context: VoiceContext) -> &'static str {
    match context {
        VoiceContext::Food => VOICE_FOOD_SYSTEM_PROMPT,
        VoiceContext::Symptom => VOICE_SYMPTOM_SYSTEM_PROMPT,
        VoiceContext::Medication => VOICE_MEDICATION_SYSTEM_PROMPT,
    }
}

/// User prompt listing the foods to score
#[must_use]
pub fn fodmap_user_prompt(food_names: &[String]) -> String {
    format!("Foods to analyse: {}", food_names.join(", "))
}

/// User prompt wrapping the analysis payload
#[must_use]
pub fn correlation_user_prompt(data_json: &str) -> String {
    format!("Data provided:\n{data_json}")
}
