// ABOUTME: Symptom journal models with range-checked severity and Bristol scale
// ABOUTME: SymptomEntry, Symptom, SymptomType, Severity, BristolScale and BodyLocation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::journal::{BRISTOL_MAX, SEVERITY_DEFAULT, SEVERITY_MAX, SEVERITY_MIN};
use crate::errors::{AppError, AppResult};
use crate::traits::{new_id, Entity, Timestamped};

/// Kind of digestive or general symptom
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SymptomType {
    /// Abdominal pain
    Pain,
    /// Bloating
    Bloating,
    /// Flatulence
    Gas,
    /// Belching
    Belching,
    /// Bowel movement, qualified by the Bristol scale
    Stool,
    /// Headache
    Headache,
    /// Anything else
    Other,
}

impl SymptomType {
    /// Wire name of the symptom type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pain => "pain",
            Self::Bloating => "bloating",
            Self::Gas => "gas",
            Self::Belching => "belching",
            Self::Stool => "stool",
            Self::Headache => "headache",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SymptomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symptom intensity, an integer in `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// Validate a raw severity
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` outside `1..=10`
    pub fn new(value: u8) -> AppResult<Self> {
        if (SEVERITY_MIN..=SEVERITY_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::out_of_range("severity", value, "1..=10"))
        }
    }

    /// Raw value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self(SEVERITY_DEFAULT)
    }
}

impl TryFrom<u8> for Severity {
    type Error = AppError;

    fn try_from(value: u8) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

/// Bristol stool form scale, an integer in `1..=7`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BristolScale(u8);

impl BristolScale {
    /// Validate a raw Bristol value
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` outside `1..=7`
    pub fn new(value: u8) -> AppResult<Self> {
        if (1..=BRISTOL_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::out_of_range("bristolScale", value, "1..=7"))
        }
    }

    /// Raw value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for BristolScale {
    type Error = AppError;

    fn try_from(value: u8) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<BristolScale> for u8 {
    fn from(scale: BristolScale) -> Self {
        scale.0
    }
}

/// Point on the body map, in percent of the drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyLocation {
    /// Horizontal position (%)
    pub x: f64,
    /// Vertical position (%)
    pub y: f64,
    /// Region tag such as `lower-left-abdomen`
    pub region: String,
}

/// One symptom observed in an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    /// Symptom kind
    #[serde(rename = "type")]
    pub symptom_type: SymptomType,
    /// Intensity
    pub severity: Severity,
    /// Where on the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<BodyLocation>,
    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Only meaningful for [`SymptomType::Stool`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bristol_scale: Option<BristolScale>,
}

impl Symptom {
    /// Create a symptom without location, note or Bristol value
    #[must_use]
    pub const fn new(symptom_type: SymptomType, severity: Severity) -> Self {
        Self {
            symptom_type,
            severity,
            location: None,
            note: None,
            bristol_scale: None,
        }
    }

    /// Set the body location
    #[must_use]
    pub fn with_location(mut self, location: BodyLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set a note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Attach a Bristol value to a stool symptom
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the symptom is not a stool record
    pub fn with_bristol_scale(mut self, scale: BristolScale) -> AppResult<Self> {
        if self.symptom_type != SymptomType::Stool {
            return Err(AppError::invalid_input(format!(
                "bristolScale only applies to stool symptoms, not {}",
                self.symptom_type
            )));
        }
        self.bristol_scale = Some(scale);
        Ok(self)
    }
}

/// Symptoms logged at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    /// Unique identifier
    pub id: String,
    /// When the symptoms were felt
    pub timestamp: DateTime<Utc>,
    /// Observed symptoms
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
}

impl SymptomEntry {
    /// Create an entry with a fresh id
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, symptoms: Vec<Symptom>) -> Self {
        Self {
            id: new_id(),
            timestamp,
            symptoms,
        }
    }

    /// Highest severity in the entry
    #[must_use]
    pub fn max_severity(&self) -> Option<Severity> {
        self.symptoms.iter().map(|symptom| symptom.severity).max()
    }
}

impl Entity for SymptomEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Timestamped for SymptomEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
