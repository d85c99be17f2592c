// ABOUTME: Food-to-symptom temporal correlation within a fixed window
// ABOUTME: Distinct local-day counting gates analysis; payload keeps the last 30 days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use gut_tracker_core::constants::analysis::{
    CORRELATION_WINDOW_HOURS, MILLIS_PER_HOUR, MIN_DAYS_FOR_ANALYSIS, PAYLOAD_LOOKBACK_DAYS,
};
use gut_tracker_core::models::{
    AnalysisPayload, CorrelationPoint, FoodEntry, MedicationEntry, SymptomEntry,
};
use gut_tracker_core::Timestamped;
use tracing::debug;

/// Borrowed view of the three journal collections at one point in time
#[derive(Debug, Clone, Copy)]
pub struct JournalSnapshot<'a> {
    /// Food entries
    pub food: &'a [FoodEntry],
    /// Medication entries
    pub medication: &'a [MedicationEntry],
    /// Symptom entries
    pub symptom: &'a [SymptomEntry],
}

impl<'a> JournalSnapshot<'a> {
    /// Bundle the three collections
    #[must_use]
    pub const fn new(
        food: &'a [FoodEntry],
        medication: &'a [MedicationEntry],
        symptom: &'a [SymptomEntry],
    ) -> Self {
        Self {
            food,
            medication,
            symptom,
        }
    }

    fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.food
            .iter()
            .map(Timestamped::timestamp)
            .chain(self.medication.iter().map(Timestamped::timestamp))
            .chain(self.symptom.iter().map(Timestamped::timestamp))
    }
}

/// Correlation engine
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Emit one point per (food item, symptom) pair where the symptom entry
    /// follows the food entry by zero to six hours inclusive
    ///
    /// Iteration is symptom entry, symptom, food entry, food item; output keeps
    /// that order. Several food entries in one window all produce points.
    #[must_use]
    pub fn compute_correlations(
        food_entries: &[FoodEntry],
        symptom_entries: &[SymptomEntry],
    ) -> Vec<CorrelationPoint> {
        let window_ms = CORRELATION_WINDOW_HOURS * 3_600_000;
        let mut points = Vec::new();

        for symptom_entry in symptom_entries {
            for symptom in &symptom_entry.symptoms {
                for food_entry in food_entries {
                    let delta_ms = (symptom_entry.timestamp - food_entry.timestamp)
                        .num_milliseconds();
                    if !(0..=window_ms).contains(&delta_ms) {
                        continue;
                    }
                    let delay_hours = Self::round_delay(delta_ms);
                    for food in &food_entry.foods {
                        points.push(CorrelationPoint {
                            food_name: food.name.clone(),
                            food_time: food_entry.timestamp,
                            symptom_type: symptom.symptom_type,
                            symptom_time: symptom_entry.timestamp,
                            severity: symptom.severity,
                            delay_hours,
                        });
                    }
                }
            }
        }

        debug!(
            food_entries = food_entries.len(),
            symptom_entries = symptom_entries.len(),
            points = points.len(),
            "computed correlations"
        );
        points
    }

    /// Count distinct calendar days, in `tz`, across all three collections
    #[must_use]
    pub fn days_available_in<Tz: TimeZone>(snapshot: &JournalSnapshot<'_>, tz: &Tz) -> usize {
        snapshot
            .timestamps()
            .map(|timestamp| timestamp.with_timezone(tz).date_naive())
            .collect::<HashSet<NaiveDate>>()
            .len()
    }

    /// Distinct local calendar days across all three collections
    #[must_use]
    pub fn days_available(snapshot: &JournalSnapshot<'_>) -> usize {
        Self::days_available_in(snapshot, &Local)
    }

    /// Whether enough distinct days exist in `tz` for analysis
    #[must_use]
    pub fn can_analyze_in<Tz: TimeZone>(snapshot: &JournalSnapshot<'_>, tz: &Tz) -> bool {
        Self::days_available_in(snapshot, tz) >= MIN_DAYS_FOR_ANALYSIS
    }

    /// Whether at least seven distinct local days are journaled
    #[must_use]
    pub fn can_analyze(snapshot: &JournalSnapshot<'_>) -> bool {
        Self::can_analyze_in(snapshot, &Local)
    }

    /// Copy of every entry with `timestamp >= now - 30 days`
    #[must_use]
    pub fn build_payload(now: DateTime<Utc>, snapshot: &JournalSnapshot<'_>) -> AnalysisPayload {
        let since = now - Duration::days(PAYLOAD_LOOKBACK_DAYS);
        AnalysisPayload {
            food: Self::recent(snapshot.food, since),
            medication: Self::recent(snapshot.medication, since),
            symptom: Self::recent(snapshot.symptom, since),
        }
    }

    fn recent<T: Timestamped + Clone>(entries: &[T], since: DateTime<Utc>) -> Vec<T> {
        entries
            .iter()
            .filter(|entry| entry.timestamp() >= since)
            .cloned()
            .collect()
    }

    /// Milliseconds to hours, rounded to one decimal
    fn round_delay(delta_ms: i64) -> f64 {
        (delta_ms as f64 / MILLIS_PER_HOUR * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_delay() {
        assert!((CorrelationEngine::round_delay(3 * 3_600_000) - 3.0).abs() < f64::EPSILON);
        assert!((CorrelationEngine::round_delay(5_400_000) - 1.5).abs() < f64::EPSILON);
        // 1h 2m 59s rounds to 1.0
        assert!((CorrelationEngine::round_delay(3_779_000) - 1.0).abs() < f64::EPSILON);
        assert!((CorrelationEngine::round_delay(0)).abs() < f64::EPSILON);
    }
}
