// ABOUTME: Journal export to JSON and CSV over a local date range
// ABOUTME: Per-collection selection, inclusive local-date filtering and RFC 4180 field quoting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Export
//!
//! JSON export mirrors the stored entries; CSV export flattens each entry into
//! one row with the columns `type,date,time,category,details,fodmap,severity`.
//! Dates and times are rendered in the exporter's time zone.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use gut_tracker_core::errors::{AppError, AppResult};
use gut_tracker_core::models::{FoodEntry, MedicationEntry, SymptomEntry};
use gut_tracker_core::traits::Timestamped;
use gut_tracker_intelligence::JournalSnapshot;
use serde::Serialize;

const CSV_HEADER: [&str; 7] = [
    "type", "date", "time", "category", "details", "fodmap", "severity",
];
const CSV_LINE_BREAK: &str = "\r\n";

// ============================================================================
// Filter
// ============================================================================

/// Collection selectable for export
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportDataType {
    /// Food entries
    Food,
    /// Medication entries
    Medication,
    /// Symptom entries
    Symptom,
}

impl ExportDataType {
    /// Every collection
    pub const ALL: [Self; 3] = [Self::Food, Self::Medication, Self::Symptom];

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Medication => "medication",
            Self::Symptom => "symptom",
        }
    }
}

impl fmt::Display for ExportDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportDataType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "medication" => Ok(Self::Medication),
            "symptom" => Ok(Self::Symptom),
            other => Err(AppError::invalid_input(format!(
                "unknown data type '{other}', expected food, medication or symptom"
            ))),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON document
    Json,
    /// CSV with CRLF line breaks
    Csv,
}

impl ExportFormat {
    /// File extension
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// File name for an export made on `date`
    #[must_use]
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("gut-tracker-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(AppError::invalid_input(format!(
                "unknown export format '{other}', expected json or csv"
            ))),
        }
    }
}

/// Date range and collections to export; both dates are inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFilter {
    /// First day
    pub from: NaiveDate,
    /// Last day
    pub to: NaiveDate,
    /// Selected collections
    pub data_types: BTreeSet<ExportDataType>,
}

impl ExportFilter {
    /// Filter over every collection
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when `from` is after `to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> AppResult<Self> {
        if from > to {
            return Err(AppError::invalid_input(format!(
                "export range starts after it ends ({from} > {to})"
            )));
        }
        Ok(Self {
            from,
            to,
            data_types: ExportDataType::ALL.into_iter().collect(),
        })
    }

    /// Restrict to the given collections
    #[must_use]
    pub fn with_data_types(mut self, data_types: impl IntoIterator<Item = ExportDataType>) -> Self {
        self.data_types = data_types.into_iter().collect();
        self
    }

    /// Whether `data_type` is selected
    #[must_use]
    pub fn includes(&self, data_type: ExportDataType) -> bool {
        self.data_types.contains(&data_type)
    }
}

// ============================================================================
// JSON document
// ============================================================================

/// Exported period
#[derive(Debug, Clone, Serialize)]
pub struct ExportPeriod {
    /// First day
    pub from: NaiveDate,
    /// Last day
    pub to: NaiveDate,
}

/// JSON export document; unselected collections are omitted
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    /// Export instant
    pub exported_at: DateTime<Utc>,
    /// Exported period
    pub period: ExportPeriod,
    /// Food entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<Vec<FoodEntry>>,
    /// Medication entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication: Option<Vec<MedicationEntry>>,
    /// Symptom entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom: Option<Vec<SymptomEntry>>,
}

// ============================================================================
// Exporter
// ============================================================================

/// Exports a journal snapshot, rendering dates in `tz`
#[derive(Debug, Clone)]
pub struct Exporter<'a, Tz: TimeZone> {
    snapshot: JournalSnapshot<'a>,
    tz: Tz,
}

impl<'a> Exporter<'a, Local> {
    /// Exporter using the local time zone
    #[must_use]
    pub const fn local(snapshot: JournalSnapshot<'a>) -> Self {
        Self {
            snapshot,
            tz: Local,
        }
    }
}

impl<'a, Tz> Exporter<'a, Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    /// Exporter rendering in `tz`
    #[must_use]
    pub const fn new(snapshot: JournalSnapshot<'a>, tz: Tz) -> Self {
        Self { snapshot, tz }
    }

    fn local_date(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.tz).date_naive()
    }

    fn in_range<T: Timestamped + Clone>(&self, entries: &[T], filter: &ExportFilter) -> Vec<T> {
        entries
            .iter()
            .filter(|entry| {
                let date = self.local_date(entry.timestamp());
                filter.from <= date && date <= filter.to
            })
            .cloned()
            .collect()
    }

    /// Entries selected by `filter`
    #[must_use]
    pub fn collect(&self, filter: &ExportFilter, exported_at: DateTime<Utc>) -> ExportData {
        ExportData {
            exported_at,
            period: ExportPeriod {
                from: filter.from,
                to: filter.to,
            },
            food: filter
                .includes(ExportDataType::Food)
                .then(|| self.in_range(self.snapshot.food, filter)),
            medication: filter
                .includes(ExportDataType::Medication)
                .then(|| self.in_range(self.snapshot.medication, filter)),
            symptom: filter
                .includes(ExportDataType::Symptom)
                .then(|| self.in_range(self.snapshot.symptom, filter)),
        }
    }

    /// Pretty-printed JSON document
    ///
    /// # Errors
    ///
    /// Returns a serialization error if an entry cannot be encoded
    pub fn to_json(&self, filter: &ExportFilter, exported_at: DateTime<Utc>) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(
            &self.collect(filter, exported_at),
        )?)
    }

    /// CSV document, header first, food then medication then symptom rows
    #[must_use]
    pub fn to_csv(&self, filter: &ExportFilter) -> String {
        let mut rows = vec![CSV_HEADER.join(",")];

        if filter.includes(ExportDataType::Food) {
            rows.extend(
                self.in_range(self.snapshot.food, filter)
                    .iter()
                    .map(|entry| self.food_row(entry)),
            );
        }
        if filter.includes(ExportDataType::Medication) {
            rows.extend(
                self.in_range(self.snapshot.medication, filter)
                    .iter()
                    .map(|entry| self.medication_row(entry)),
            );
        }
        if filter.includes(ExportDataType::Symptom) {
            rows.extend(
                self.in_range(self.snapshot.symptom, filter)
                    .iter()
                    .map(|entry| self.symptom_row(entry)),
            );
        }

        rows.join(CSV_LINE_BREAK)
    }

    fn date_time(&self, timestamp: DateTime<Utc>) -> (String, String) {
        let local = timestamp.with_timezone(&self.tz);
        (
            local.format("%Y-%m-%d").to_string(),
            local.format("%H:%M").to_string(),
        )
    }

    fn food_row(&self, entry: &FoodEntry) -> String {
        let (date, time) = self.date_time(entry.timestamp);
        let details = entry
            .foods
            .iter()
            .map(|food| match &food.quantity {
                Some(quantity) => format!("{} ({quantity})", food.name),
                None => food.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        let fodmap = entry
            .global_fodmap_score
            .as_ref()
            .map(|score| score.level().as_str())
            .unwrap_or_default();
        csv_row(&[
            "food",
            &date,
            &time,
            entry.meal_type.as_str(),
            &details,
            fodmap,
            "",
        ])
    }

    fn medication_row(&self, entry: &MedicationEntry) -> String {
        let (date, time) = self.date_time(entry.timestamp);
        let details = entry
            .medications
            .iter()
            .map(|medication| match &medication.dose {
                Some(dose) => format!("{} {dose}", medication.name),
                None => medication.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        let categories = distinct_in_order(
            entry
                .medications
                .iter()
                .map(|medication| medication.medication_type.as_str()),
        );
        csv_row(&["medication", &date, &time, &categories, &details, "", ""])
    }

    fn symptom_row(&self, entry: &SymptomEntry) -> String {
        let (date, time) = self.date_time(entry.timestamp);
        let details = entry
            .symptoms
            .iter()
            .map(|symptom| match &symptom.location {
                Some(location) => format!("{} ({})", symptom.symptom_type, location.region),
                None => symptom.symptom_type.as_str().to_owned(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        let types = distinct_in_order(
            entry
                .symptoms
                .iter()
                .map(|symptom| symptom.symptom_type.as_str()),
        );
        let severity = entry
            .max_severity()
            .map(|severity| severity.value().to_string())
            .unwrap_or_default();
        csv_row(&["symptom", &date, &time, &types, &details, "", &severity])
    }
}

fn distinct_in_order<'s>(values: impl Iterator<Item = &'s str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.join("; ")
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| csv_escape(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field containing a comma, a double quote or a line break
#[must_use]
pub fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
