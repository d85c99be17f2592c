// ABOUTME: Structured results extracted from AI answers for photos and FODMAP scoring
// ABOUTME: Lenient deserialization so partially filled model output still parses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::FodmapLevel;

/// A food identified on a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedFood {
    /// Food name
    pub name: String,
    /// Model confidence in `[0, 1]`
    #[serde(default)]
    pub confidence: f64,
    /// Estimated quantity
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Result of photo recognition
///
/// `Default` is the empty shape returned when the model answer holds no usable JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRecognitionResult {
    /// Clearly identified foods
    #[serde(default)]
    pub foods: Vec<RecognizedFood>,
    /// Items the model saw but could not identify with confidence
    #[serde(default)]
    pub uncertain: Vec<String>,
}

/// FODMAP assessment of one food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FodmapAnalysisFood {
    /// Food name
    pub name: String,
    /// Level
    #[serde(default)]
    pub fodmap_level: FodmapLevel,
    /// Estimated score, nominally `0..=10`
    #[serde(default)]
    pub score: f64,
    /// Dominant FODMAP families (fructans, GOS, ...)
    #[serde(default)]
    pub main_fodmaps: Vec<String>,
    /// Portion advice
    #[serde(default)]
    pub notes: String,
}

/// FODMAP assessment of a list of foods
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FodmapAnalysisResult {
    /// Per-food assessments
    #[serde(default)]
    pub foods: Vec<FodmapAnalysisFood>,
    /// Score for the whole meal, absent when the model gave none
    #[serde(default)]
    pub global_score: Option<f64>,
    /// Level for the whole meal, absent when the model gave none
    #[serde(default)]
    pub global_level: Option<FodmapLevel>,
    /// Advice text
    #[serde(default)]
    pub advice: String,
}

impl FodmapAnalysisResult {
    /// Degraded result carrying the raw model text as advice and no score
    #[must_use]
    pub fn fallback(raw_text: impl Into<String>) -> Self {
        Self {
            foods: Vec::new(),
            global_score: None,
            global_level: None,
            advice: raw_text.into(),
        }
    }

    /// Meal level and score, when the model provided both
    #[must_use]
    pub fn global_estimate(&self) -> Option<(FodmapLevel, f64)> {
        self.global_level.zip(self.global_score)
    }

    /// Assessment for a food, matched case-insensitively by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FodmapAnalysisFood> {
        self.foods
            .iter()
            .find(|food| food.name.eq_ignore_ascii_case(name.trim()))
    }
}
