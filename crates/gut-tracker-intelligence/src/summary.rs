// ABOUTME: Per-food aggregation of correlation points
// ABOUTME: Occurrence count, mean severity, mean delay and symptom types per food name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use gut_tracker_core::models::{CorrelationPoint, SymptomType};
use serde::{Deserialize, Serialize};

/// Aggregated correlations for one food name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationSummary {
    /// Food name as first seen
    pub food_name: String,
    /// Number of correlation points for this food
    pub occurrences: usize,
    /// Mean symptom severity
    pub mean_severity: f64,
    /// Mean delay in hours
    pub mean_delay_hours: f64,
    /// Distinct symptom types, in declaration order
    pub symptom_types: Vec<SymptomType>,
}

#[derive(Default)]
struct Accumulator {
    name: String,
    occurrences: usize,
    severity_total: f64,
    delay_total: f64,
    symptom_types: BTreeSet<SymptomType>,
}

/// Groups correlation points by food
pub struct CorrelationSummarizer;

impl CorrelationSummarizer {
    /// Summarize points per food name (case-insensitive), most frequent first,
    /// ties broken by higher mean severity then by name
    #[must_use]
    pub fn summarize(points: &[CorrelationPoint]) -> Vec<CorrelationSummary> {
        let mut groups: HashMap<String, Accumulator> = HashMap::new();

        for point in points {
            let key = point.food_name.trim().to_lowercase();
            let group = groups.entry(key).or_insert_with(|| Accumulator {
                name: point.food_name.trim().to_owned(),
                ..Accumulator::default()
            });
            group.occurrences += 1;
            group.severity_total += f64::from(point.severity.value());
            group.delay_total += point.delay_hours;
            group.symptom_types.insert(point.symptom_type);
        }

        let mut summaries: Vec<CorrelationSummary> = groups
            .into_values()
            .map(|group| {
                let count = group.occurrences as f64;
                CorrelationSummary {
                    food_name: group.name,
                    occurrences: group.occurrences,
                    mean_severity: round_one(group.severity_total / count),
                    mean_delay_hours: round_one(group.delay_total / count),
                    symptom_types: group.symptom_types.into_iter().collect(),
                }
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.occurrences
                .cmp(&a.occurrences)
                .then_with(|| {
                    b.mean_severity
                        .partial_cmp(&a.mean_severity)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.food_name.cmp(&b.food_name))
        });
        summaries
    }
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
