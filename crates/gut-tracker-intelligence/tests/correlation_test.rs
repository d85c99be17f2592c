// ABOUTME: Integration tests for the correlation engine
// ABOUTME: Window bounds, per-food expansion, distinct-day gating and payload lookback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use gut_tracker_core::models::{
    Food, FoodEntry, MealType, Medication, MedicationEntry, MedicationType, Severity, Symptom,
    SymptomEntry, SymptomType,
};
use gut_tracker_intelligence::{CorrelationEngine, CorrelationSummarizer, JournalSnapshot};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

fn meal(time: DateTime<Utc>, names: &[&str]) -> FoodEntry {
    FoodEntry::new(
        time,
        MealType::Lunch,
        names.iter().map(|name| Food::new(*name)).collect(),
    )
}

fn symptom(time: DateTime<Utc>, symptom_type: SymptomType, severity: u8) -> SymptomEntry {
    SymptomEntry::new(
        time,
        vec![Symptom::new(symptom_type, Severity::new(severity).unwrap())],
    )
}

// =============================================================================
// Window Tests
// =============================================================================

#[test]
fn test_end_to_end_single_point() {
    let food = vec![meal(at("2024-06-01T12:00:00Z"), &["Poireau"])];
    let symptoms = vec![symptom(at("2024-06-01T15:00:00Z"), SymptomType::Bloating, 7)];

    let points = CorrelationEngine::compute_correlations(&food, &symptoms);

    assert_eq!(points.len(), 1);
    let point = &points[0];
    assert_eq!(point.food_name, "Poireau");
    assert_eq!(point.symptom_type, SymptomType::Bloating);
    assert_eq!(point.severity.value(), 7);
    assert!((point.delay_hours - 3.0).abs() < f64::EPSILON);
    assert_eq!(point.food_time, at("2024-06-01T12:00:00Z"));
    assert_eq!(point.symptom_time, at("2024-06-01T15:00:00Z"));
}

#[test]
fn test_window_bounds_inclusive() {
    let base = at("2024-06-01T12:00:00Z");
    let food = vec![meal(base, &["Apple"])];

    let cases = [
        (Duration::zero(), true),
        (Duration::hours(6), true),
        (Duration::hours(6) + Duration::minutes(1), false),
        (Duration::minutes(-1), false),
    ];

    for (offset, expected) in cases {
        let symptoms = vec![symptom(base + offset, SymptomType::Pain, 4)];
        let points = CorrelationEngine::compute_correlations(&food, &symptoms);
        assert_eq!(
            !points.is_empty(),
            expected,
            "offset {offset} should emit: {expected}"
        );
    }
}

#[test]
fn test_delay_within_bounds() {
    let base = at("2024-06-01T08:00:00Z");
    let food = vec![
        meal(base, &["Bread"]),
        meal(base + Duration::hours(2), &["Milk"]),
    ];
    let symptoms = vec![symptom(base + Duration::hours(5), SymptomType::Gas, 3)];

    let points = CorrelationEngine::compute_correlations(&food, &symptoms);

    assert_eq!(points.len(), 2);
    for point in &points {
        assert!((0.0..=6.0).contains(&point.delay_hours));
    }
    assert!((points[0].delay_hours - 5.0).abs() < f64::EPSILON);
    assert!((points[1].delay_hours - 3.0).abs() < f64::EPSILON);
}

// =============================================================================
// Expansion Tests
// =============================================================================

#[test]
fn test_each_food_item_produces_a_point() {
    let food = vec![meal(at("2024-06-01T12:00:00Z"), &["Onion", "Garlic", "Wheat"])];
    let symptoms = vec![symptom(at("2024-06-01T13:30:00Z"), SymptomType::Pain, 6)];

    let points = CorrelationEngine::compute_correlations(&food, &symptoms);

    let names: Vec<_> = points.iter().map(|point| point.food_name.as_str()).collect();
    assert_eq!(names, ["Onion", "Garlic", "Wheat"]);
    assert!(points.iter().all(|point| (point.delay_hours - 1.5).abs() < f64::EPSILON));
}

#[test]
fn test_each_symptom_in_entry_expands() {
    let food = vec![meal(at("2024-06-01T12:00:00Z"), &["Beans"])];
    let entry = SymptomEntry::new(
        at("2024-06-01T14:00:00Z"),
        vec![
            Symptom::new(SymptomType::Gas, Severity::new(5).unwrap()),
            Symptom::new(SymptomType::Bloating, Severity::new(8).unwrap()),
        ],
    );

    let points = CorrelationEngine::compute_correlations(&food, &[entry]);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].symptom_type, SymptomType::Gas);
    assert_eq!(points[1].symptom_type, SymptomType::Bloating);
}

#[test]
fn test_empty_food_list_emits_nothing() {
    let food = vec![meal(at("2024-06-01T12:00:00Z"), &[])];
    let symptoms = vec![symptom(at("2024-06-01T13:00:00Z"), SymptomType::Pain, 2)];

    assert!(CorrelationEngine::compute_correlations(&food, &symptoms).is_empty());
}

// =============================================================================
// Gating Tests
// =============================================================================

fn day(n: i64) -> DateTime<Utc> {
    at("2024-06-01T10:00:00Z") + Duration::days(n)
}

#[test]
fn test_gating_six_days_false_seven_true() {
    let food = vec![meal(day(0), &["Rice"]), meal(day(1), &["Rice"])];
    let medication = vec![
        MedicationEntry::new(day(2), vec![Medication::new("Lactase", MedicationType::Enzyme)]),
        MedicationEntry::new(day(3), vec![]),
    ];
    let mut symptoms = vec![
        symptom(day(4), SymptomType::Gas, 2),
        symptom(day(5), SymptomType::Gas, 2),
        // same day as day(5), must not count twice
        symptom(day(5) + Duration::hours(3), SymptomType::Pain, 2),
    ];

    let snapshot = JournalSnapshot::new(&food, &medication, &symptoms);
    assert_eq!(CorrelationEngine::days_available_in(&snapshot, &Utc), 6);
    assert!(!CorrelationEngine::can_analyze_in(&snapshot, &Utc));

    symptoms.push(symptom(day(6), SymptomType::Headache, 1));
    let snapshot = JournalSnapshot::new(&food, &medication, &symptoms);
    assert_eq!(CorrelationEngine::days_available_in(&snapshot, &Utc), 7);
    assert!(CorrelationEngine::can_analyze_in(&snapshot, &Utc));
}

#[test]
fn test_days_counted_in_local_calendar() {
    let food = vec![
        meal(at("2024-06-01T23:30:00Z"), &["Tea"]),
        meal(at("2024-06-02T00:30:00Z"), &["Tea"]),
    ];
    let snapshot = JournalSnapshot::new(&food, &[], &[]);

    assert_eq!(CorrelationEngine::days_available_in(&snapshot, &Utc), 2);
    let paris_summer = FixedOffset::east_opt(2 * 3600).unwrap();
    assert_eq!(
        CorrelationEngine::days_available_in(&snapshot, &paris_summer),
        1
    );
}

// =============================================================================
// Payload Tests
// =============================================================================

#[test]
fn test_payload_keeps_last_thirty_days() {
    let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    let food = vec![
        meal(now - Duration::days(31), &["Old"]),
        meal(now - Duration::days(30), &["Boundary"]),
        meal(now - Duration::days(1), &["Recent"]),
    ];
    let medication = vec![MedicationEntry::new(now - Duration::days(40), vec![])];
    let symptoms = vec![symptom(now - Duration::hours(2), SymptomType::Pain, 3)];

    let payload = CorrelationEngine::build_payload(
        now,
        &JournalSnapshot::new(&food, &medication, &symptoms),
    );

    let names: Vec<_> = payload
        .food
        .iter()
        .map(|entry| entry.foods[0].name.as_str())
        .collect();
    assert_eq!(names, ["Boundary", "Recent"]);
    assert!(payload.medication.is_empty());
    assert_eq!(payload.symptom.len(), 1);

    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("food").is_some());
    assert!(json.get("medication").is_some());
    assert!(json.get("symptom").is_some());
}

// =============================================================================
// Summary Tests
// =============================================================================

#[test]
fn test_summary_groups_by_food() {
    let food = vec![
        meal(at("2024-06-01T12:00:00Z"), &["Onion", "Rice"]),
        meal(at("2024-06-02T12:00:00Z"), &["onion"]),
    ];
    let symptoms = vec![
        symptom(at("2024-06-01T14:00:00Z"), SymptomType::Bloating, 8),
        symptom(at("2024-06-02T13:00:00Z"), SymptomType::Pain, 6),
    ];

    let points = CorrelationEngine::compute_correlations(&food, &symptoms);
    let summaries = CorrelationSummarizer::summarize(&points);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].food_name, "Onion");
    assert_eq!(summaries[0].occurrences, 2);
    assert!((summaries[0].mean_severity - 7.0).abs() < f64::EPSILON);
    assert!((summaries[0].mean_delay_hours - 1.5).abs() < f64::EPSILON);
    assert_eq!(
        summaries[0].symptom_types,
        [SymptomType::Pain, SymptomType::Bloating]
    );
    assert_eq!(summaries[1].food_name, "Rice");
    assert_eq!(summaries[1].occurrences, 1);
}
