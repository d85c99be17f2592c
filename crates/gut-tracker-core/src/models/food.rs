// ABOUTME: Food journal models with optional AI-assigned FODMAP scores
// ABOUTME: FoodEntry, Food, MealType, FodmapLevel and validated FodmapScore definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::journal::FODMAP_SCORE_MAX;
use crate::errors::{AppError, AppResult};
use crate::traits::{new_id, Entity, Timestamped};

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Standalone drink
    Drink,
}

impl MealType {
    /// Wire name of the meal type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
            Self::Drink => "drink",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FODMAP load classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FodmapLevel {
    /// Well tolerated at normal portions
    #[default]
    Low,
    /// Tolerated in small portions
    Medium,
    /// Likely trigger
    High,
}

impl FodmapLevel {
    /// Wire name of the level
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for FodmapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable FODMAP assessment; rescoring produces a new value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFodmapScore")]
pub struct FodmapScore {
    level: FodmapLevel,
    score: u8,
    details: String,
    analyzed_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFodmapScore {
    level: FodmapLevel,
    score: u8,
    #[serde(default)]
    details: String,
    analyzed_at: DateTime<Utc>,
}

impl TryFrom<RawFodmapScore> for FodmapScore {
    type Error = AppError;

    fn try_from(raw: RawFodmapScore) -> AppResult<Self> {
        Self::new(raw.level, raw.score, raw.details, raw.analyzed_at)
    }
}

impl FodmapScore {
    /// Build a score, rejecting values above 10
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `score > 10`
    pub fn new(
        level: FodmapLevel,
        score: u8,
        details: impl Into<String>,
        analyzed_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if score > FODMAP_SCORE_MAX {
            return Err(AppError::out_of_range("fodmapScore.score", score, "0..=10"));
        }
        Ok(Self {
            level,
            score,
            details: details.into(),
            analyzed_at,
        })
    }

    /// Build a score from an AI estimate, rounding and clamping into `0..=10`
    #[must_use]
    pub fn from_estimate(
        level: FodmapLevel,
        estimate: f64,
        details: impl Into<String>,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        let score = if estimate.is_finite() {
            estimate.round().clamp(0.0, f64::from(FODMAP_SCORE_MAX)) as u8
        } else {
            0
        };
        Self {
            level,
            score,
            details: details.into(),
            analyzed_at,
        }
    }

    /// FODMAP level
    #[must_use]
    pub const fn level(&self) -> FodmapLevel {
        self.level
    }

    /// Score in `0..=10`
    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Free-text explanation
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// When the assessment was produced
    #[must_use]
    pub const fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }
}

/// Individual food item within a meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    /// Unique identifier
    pub id: String,
    /// Food name as entered or recognized
    pub name: String,
    /// `None` until an AI scoring call succeeds
    #[serde(default)]
    pub fodmap_score: Option<FodmapScore>,
    /// Free-text quantity ("200 g", "1 bowl")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl Food {
    /// Create an unscored food with a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            fodmap_score: None,
            quantity: None,
        }
    }

    /// Set the quantity
    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }
}

/// A meal or drink logged at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    /// Unique identifier
    pub id: String,
    /// When the food was eaten
    pub timestamp: DateTime<Utc>,
    /// Meal classification
    pub meal_type: MealType,
    /// Ordered list of foods; may be empty
    #[serde(default)]
    pub foods: Vec<Food>,
    /// Photo reference (data URL or path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Score for the whole meal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_fodmap_score: Option<FodmapScore>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FoodEntry {
    /// Create an entry with a fresh id
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, meal_type: MealType, foods: Vec<Food>) -> Self {
        Self {
            id: new_id(),
            timestamp,
            meal_type,
            foods,
            photo_url: None,
            global_fodmap_score: None,
            notes: None,
        }
    }

    /// Set notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Names of the foods in entry order
    #[must_use]
    pub fn food_names(&self) -> Vec<String> {
        self.foods.iter().map(|food| food.name.clone()).collect()
    }
}

impl Entity for FoodEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Timestamped for FoodEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
