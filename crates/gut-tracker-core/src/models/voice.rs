// ABOUTME: Structured results of dictated journal entries
// ABOUTME: VoiceContext selects the prompt; each context has its own result shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{BristolScale, MealType, MedicationType, Severity, SymptomType};
use crate::errors::AppError;

/// Which journal a dictation is meant for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoiceContext {
    /// Meal dictation
    Food,
    /// Symptom dictation
    Symptom,
    /// Medication dictation
    Medication,
}

impl VoiceContext {
    /// Wire name of the context
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Symptom => "symptom",
            Self::Medication => "medication",
        }
    }
}

impl fmt::Display for VoiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceContext {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "symptom" => Ok(Self::Symptom),
            "medication" => Ok(Self::Medication),
            other => Err(AppError::invalid_input(format!(
                "unknown voice context '{other}', expected food, symptom or medication"
            ))),
        }
    }
}

/// One dictated food
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceFood {
    /// Food name
    pub name: String,
    /// Quantity if mentioned
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Dictated meal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceFoodResult {
    /// Meal type if it could be inferred
    #[serde(default)]
    pub meal_type: Option<MealType>,
    /// Foods mentioned
    #[serde(default)]
    pub foods: Vec<VoiceFood>,
    /// Remaining remarks
    #[serde(default)]
    pub notes: Option<String>,
}

/// One dictated symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSymptom {
    /// Symptom kind
    #[serde(rename = "type")]
    pub symptom_type: SymptomType,
    /// Intensity, 5 when not stated
    #[serde(default)]
    pub severity: Severity,
    /// Body region hint
    #[serde(default)]
    pub location_hint: Option<String>,
    /// Free-text note
    #[serde(default)]
    pub note: Option<String>,
    /// Bristol value for stool symptoms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bristol_scale: Option<BristolScale>,
}

/// Dictated symptoms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSymptomResult {
    /// Symptoms mentioned
    #[serde(default)]
    pub symptoms: Vec<VoiceSymptom>,
}

/// One dictated medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceMedication {
    /// Product name
    pub name: String,
    /// Treatment family
    #[serde(rename = "type", default = "default_medication_type")]
    pub medication_type: MedicationType,
    /// Dose if mentioned
    #[serde(default)]
    pub dose: Option<String>,
}

const fn default_medication_type() -> MedicationType {
    MedicationType::Other
}

/// Dictated medications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceMedicationResult {
    /// Medications mentioned
    #[serde(default)]
    pub medications: Vec<VoiceMedication>,
}

/// Context-specific structured data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VoiceParseData {
    /// Meal
    Food(VoiceFoodResult),
    /// Symptoms
    Symptom(VoiceSymptomResult),
    /// Medications
    Medication(VoiceMedicationResult),
}

impl VoiceParseData {
    /// Empty result for a context
    #[must_use]
    pub fn empty(context: VoiceContext) -> Self {
        match context {
            VoiceContext::Food => Self::Food(VoiceFoodResult::default()),
            VoiceContext::Symptom => Self::Symptom(VoiceSymptomResult::default()),
            VoiceContext::Medication => Self::Medication(VoiceMedicationResult::default()),
        }
    }

    /// Whether nothing was recognized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Food(food) => food.foods.is_empty() && food.meal_type.is_none(),
            Self::Symptom(symptom) => symptom.symptoms.is_empty(),
            Self::Medication(medication) => medication.medications.is_empty(),
        }
    }
}

/// Dictation outcome: context, original transcript and structured data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceParseResult {
    /// Context the transcript was parsed for
    pub context: VoiceContext,
    /// Original transcript
    pub transcript: String,
    /// Structured data
    pub data: VoiceParseData,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_symptom_default_severity() {
        let json = r#"{"symptoms":[{"type":"bloating","locationHint":"lower belly","note":null}]}"#;
        let result: VoiceSymptomResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.symptoms[0].severity.value(), 5);
        assert_eq!(
            result.symptoms[0].location_hint.as_deref(),
            Some("lower belly")
        );
    }

    #[test]
    fn test_voice_context_parsing() {
        assert_eq!("Symptom".parse::<VoiceContext>().unwrap(), VoiceContext::Symptom);
        assert!("sleep".parse::<VoiceContext>().is_err());
    }

    #[test]
    fn test_empty_data_matches_context() {
        assert!(matches!(
            VoiceParseData::empty(VoiceContext::Medication),
            VoiceParseData::Medication(_)
        ));
        assert!(VoiceParseData::empty(VoiceContext::Food).is_empty());
    }
}
