// ABOUTME: Derived correlation and analysis types, recomputed on every request
// ABOUTME: CorrelationPoint, AnalysisResult and the 30-day AnalysisPayload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FoodEntry, MedicationEntry, Severity, SymptomEntry, SymptomType};

/// A food followed by a symptom within the correlation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPoint {
    /// Food item name
    pub food_name: String,
    /// When the food entry was logged
    pub food_time: DateTime<Utc>,
    /// Symptom kind
    pub symptom_type: SymptomType,
    /// When the symptom entry was logged
    pub symptom_time: DateTime<Utc>,
    /// Symptom intensity
    pub severity: Severity,
    /// Delay between food and symptom, rounded to one decimal, in `[0, 6]`
    pub delay_hours: f64,
}

/// Narrative report produced by the AI provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Report text, returned unmodified
    pub report: String,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
}

/// Recent history forwarded to the narrative analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    /// Food entries
    pub food: Vec<FoodEntry>,
    /// Medication entries
    pub medication: Vec<MedicationEntry>,
    /// Symptom entries
    pub symptom: Vec<SymptomEntry>,
}

impl AnalysisPayload {
    /// Whether the payload holds no entries at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.food.is_empty() && self.medication.is_empty() && self.symptom.is_empty()
    }
}
