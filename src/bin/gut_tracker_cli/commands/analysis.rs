// ABOUTME: Correlation commands for the gut-tracker CLI
// ABOUTME: Distinct-day gating, correlation listing and the narrated analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gut_tracker::analysis::AnalysisService;
use gut_tracker::constants::analysis::MIN_DAYS_FOR_ANALYSIS;
use gut_tracker::errors::AppResult;
use tracing::info;

use crate::helpers::display::{display_correlations, display_summaries};
use crate::AppContext;

fn service(ctx: &AppContext) -> AnalysisService {
    AnalysisService::new(ctx.gateway.clone(), ctx.journal.clone())
}

/// Print the distinct-day count and whether analysis is available
pub fn days(ctx: &AppContext) {
    let service = service(ctx);
    let days = service.days_available();
    println!("{days} distinct day(s) recorded");
    if service.can_analyze() {
        println!("Analysis available");
    } else {
        println!(
            "Analysis needs {MIN_DAYS_FOR_ANALYSIS} days, {} more to go",
            MIN_DAYS_FOR_ANALYSIS.saturating_sub(days)
        );
    }
}

/// Print correlation points or per-food summaries
pub fn correlations(ctx: &AppContext, summary: bool) {
    let service = service(ctx);
    if summary {
        display_summaries(&service.summaries());
    } else {
        display_correlations(&service.compute_correlations());
    }
}

/// Run the narrated analysis and print the report
pub async fn analyze(ctx: &AppContext) -> AppResult<()> {
    let service = service(ctx);
    if !service.can_analyze() {
        println!(
            "Not enough data: {} of {MIN_DAYS_FOR_ANALYSIS} days recorded",
            service.days_available()
        );
        return Ok(());
    }

    info!(provider = %ctx.gateway.active_provider_id(), "running analysis");
    match service.analyze().await {
        Ok(result) => {
            println!("{}", result.report);
            println!(
                "\nGenerated {}",
                result.generated_at.format("%Y-%m-%d %H:%M UTC")
            );
            Ok(())
        }
        Err(e) => {
            if let Some(message) = service.last_error() {
                eprintln!("{message}");
            }
            if e.is_quota_error() {
                eprintln!("Quota exhausted: wait or select another provider with `gut-tracker settings select`");
            }
            Err(e)
        }
    }
}
