// ABOUTME: Medication journal models for enzymes, probiotics and other treatments
// ABOUTME: MedicationEntry, Medication and MedicationType definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::{new_id, Entity, Timestamped};

/// Treatment family
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MedicationType {
    /// Digestive enzyme (lactase, alpha-galactosidase)
    Enzyme,
    /// Probiotic
    Probiotic,
    /// Antibiotic (rifaximin, ...)
    Antibiotic,
    /// Antispasmodic
    Antispasmodic,
    /// Anything else
    Other,
}

impl MedicationType {
    /// Wire name of the medication type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Enzyme => "enzyme",
            Self::Probiotic => "probiotic",
            Self::Antibiotic => "antibiotic",
            Self::Antispasmodic => "antispasmodic",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MedicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One medication taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Product name
    pub name: String,
    /// Treatment family
    #[serde(rename = "type")]
    pub medication_type: MedicationType,
    /// Free-text dose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
}

impl Medication {
    /// Create a medication without dose
    #[must_use]
    pub fn new(name: impl Into<String>, medication_type: MedicationType) -> Self {
        Self {
            name: name.into(),
            medication_type,
            dose: None,
        }
    }

    /// Set the dose
    #[must_use]
    pub fn with_dose(mut self, dose: impl Into<String>) -> Self {
        self.dose = Some(dose.into());
        self
    }
}

/// Medications taken at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEntry {
    /// Unique identifier
    pub id: String,
    /// When the medications were taken
    pub timestamp: DateTime<Utc>,
    /// Medications taken
    #[serde(default)]
    pub medications: Vec<Medication>,
}

impl MedicationEntry {
    /// Create an entry with a fresh id
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, medications: Vec<Medication>) -> Self {
        Self {
            id: new_id(),
            timestamp,
            medications,
        }
    }
}

impl Entity for MedicationEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Timestamped for MedicationEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
