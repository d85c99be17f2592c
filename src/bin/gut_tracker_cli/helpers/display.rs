// ABOUTME: Output formatting helpers for the gut-tracker CLI
// ABOUTME: Correlation tables, summaries and redacted provider settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Local;
use gut_tracker::config::{AiProviderId, AiSettings};
use gut_tracker::errors::AppResult;
use gut_tracker::intelligence::CorrelationSummary;
use gut_tracker::models::{CorrelationPoint, SymptomType};
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display one line per correlation point
pub fn display_correlations(points: &[CorrelationPoint]) {
    if points.is_empty() {
        println!("No food was followed by a symptom within six hours.");
        return;
    }
    println!(
        "{:<24} {:<17} {:<10} {:>8} {:>7}",
        "FOOD", "EATEN", "SYMPTOM", "SEVERITY", "DELAY"
    );
    println!("{}", "=".repeat(70));
    for point in points {
        println!(
            "{:<24} {:<17} {:<10} {:>8} {:>6}h",
            point.food_name,
            point.food_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            point.symptom_type.as_str(),
            point.severity.value(),
            point.delay_hours
        );
    }
    println!("\n{} pair(s)", points.len());
}

/// Display per-food correlation summaries
pub fn display_summaries(summaries: &[CorrelationSummary]) {
    if summaries.is_empty() {
        println!("No food was followed by a symptom within six hours.");
        return;
    }
    println!(
        "{:<24} {:>5} {:>9} {:>10}  SYMPTOMS",
        "FOOD", "PAIRS", "SEVERITY", "DELAY"
    );
    println!("{}", "=".repeat(70));
    for summary in summaries {
        let types = summary
            .symptom_types
            .iter()
            .map(SymptomType::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<24} {:>5} {:>9.1} {:>9.1}h  {types}",
            summary.food_name, summary.occurrences, summary.mean_severity, summary.mean_delay_hours
        );
    }
}

/// Display AI settings without revealing API keys
pub fn display_settings(settings: &AiSettings) {
    println!(
        "Selected provider: {} ({})",
        settings.selected_provider,
        settings.selected_provider.display_name()
    );
    println!("{}", "=".repeat(70));
    for id in AiProviderId::ALL {
        let provider = settings.providers.get(id);
        let marker = if id == settings.selected_provider { "*" } else { " " };
        let key = match (id.requires_api_key(), provider.usable_api_key()) {
            (false, _) => "not required",
            (true, Some(_)) => "set",
            (true, None) => "missing",
        };
        println!(
            "{marker} {:<10} model: {:<20} key: {:<12} endpoint: {}",
            id.as_str(),
            provider.model,
            key,
            provider.base_url.as_deref().unwrap_or("default")
        );
    }
}
