// ABOUTME: Export command for the gut-tracker CLI
// ABOUTME: Writes the filtered journal as JSON or CSV to stdout or a file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use chrono::{Duration, Local, NaiveDate, Utc};
use gut_tracker::constants::analysis::PAYLOAD_LOOKBACK_DAYS;
use gut_tracker::errors::AppResult;
use gut_tracker::export::{ExportDataType, ExportFilter, ExportFormat, Exporter};
use gut_tracker::intelligence::JournalSnapshot;
use tokio::fs;
use tracing::info;

use crate::AppContext;

/// Export the journal
pub async fn run(
    ctx: &AppContext,
    format: ExportFormat,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    types: &[ExportDataType],
    output: Option<&Path>,
) -> AppResult<()> {
    let today = Local::now().date_naive();
    let to = to.unwrap_or(today);
    let from = from.unwrap_or_else(|| {
        to.checked_sub_signed(Duration::days(PAYLOAD_LOOKBACK_DAYS))
            .unwrap_or(to)
    });

    let mut filter = ExportFilter::new(from, to)?;
    if !types.is_empty() {
        filter = filter.with_data_types(types.iter().copied());
    }

    let food = ctx.journal.food.entries();
    let medication = ctx.journal.medication.entries();
    let symptom = ctx.journal.symptom.entries();
    let exporter = Exporter::local(JournalSnapshot::new(&food, &medication, &symptom));

    let content = match format {
        ExportFormat::Json => exporter.to_json(&filter, Utc::now())?,
        ExportFormat::Csv => exporter.to_csv(&filter),
    };

    match output {
        Some(path) => {
            fs::write(path, content).await?;
            info!(path = %path.display(), "export written");
            println!("Exported to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
