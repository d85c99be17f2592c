// ABOUTME: Core data models for the GutTracker journal and its AI features
// ABOUTME: Re-exports food, symptom, medication, recognition, voice and analysis types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Journal entries are created by user action, persisted through a repository
//! and only ever replaced whole. Derived types (`CorrelationPoint`,
//! `AnalysisResult`) are recomputed on every call and never stored.
//!
//! All entry types serialize with camelCase field names so that stored files
//! and analysis payloads keep one stable JSON shape.

mod analysis;
mod food;
mod medication;
mod recognition;
mod symptom;
mod voice;

pub use analysis::{AnalysisPayload, AnalysisResult, CorrelationPoint};
pub use food::{FodmapLevel, FodmapScore, Food, FoodEntry, MealType};
pub use medication::{Medication, MedicationEntry, MedicationType};
pub use recognition::{
    FodmapAnalysisFood, FodmapAnalysisResult, ImageRecognitionResult, RecognizedFood,
};
pub use symptom::{BodyLocation, BristolScale, Severity, Symptom, SymptomEntry, SymptomType};
pub use voice::{
    VoiceContext, VoiceFood, VoiceFoodResult, VoiceMedication, VoiceMedicationResult,
    VoiceParseData, VoiceParseResult, VoiceSymptom, VoiceSymptomResult,
};
