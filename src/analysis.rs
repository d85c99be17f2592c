// ABOUTME: Correlation analysis service over the journal stores and the AI gateway
// ABOUTME: Day gating, windowed correlations, summaries and the narrated 30-day analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Service
//!
//! Binds the pure [`CorrelationEngine`] to the current store snapshots and
//! forwards the 30-day payload to the [`AiGateway`] for narration. The
//! synchronous operations never suspend.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use gut_tracker_core::errors::{AppError, AppResult};
use gut_tracker_core::models::{AnalysisResult, CorrelationPoint};
use gut_tracker_intelligence::{
    CorrelationEngine, CorrelationSummarizer, CorrelationSummary, JournalSnapshot,
};
use tracing::{error, info, instrument};

use crate::busy::BusyFlag;
use crate::gateway::AiGateway;
use crate::stores::Journal;

/// Shown when the failure carries no provider id
const GENERIC_ANALYSIS_ERROR: &str = "Analysis failed, check your AI settings";

/// Correlation analysis over the journal
pub struct AnalysisService {
    gateway: Arc<AiGateway>,
    journal: Journal,
    busy: BusyFlag,
    last_error: RwLock<Option<String>>,
}

impl AnalysisService {
    /// Service reading `journal` and narrating through `gateway`
    #[must_use]
    pub fn new(gateway: Arc<AiGateway>, journal: Journal) -> Self {
        Self {
            gateway,
            journal,
            busy: BusyFlag::new(),
            last_error: RwLock::new(None),
        }
    }

    fn with_snapshot<R>(&self, f: impl FnOnce(&JournalSnapshot<'_>) -> R) -> R {
        let food = self.journal.food.entries();
        let medication = self.journal.medication.entries();
        let symptom = self.journal.symptom.entries();
        f(&JournalSnapshot::new(&food, &medication, &symptom))
    }

    /// Distinct local calendar days across the three collections
    #[must_use]
    pub fn days_available(&self) -> usize {
        self.with_snapshot(CorrelationEngine::days_available)
    }

    /// Whether enough days are recorded to run an analysis
    #[must_use]
    pub fn can_analyze(&self) -> bool {
        self.with_snapshot(CorrelationEngine::can_analyze)
    }

    /// Food to symptom pairs within the correlation window
    #[must_use]
    pub fn compute_correlations(&self) -> Vec<CorrelationPoint> {
        let food = self.journal.food.entries();
        let symptom = self.journal.symptom.entries();
        CorrelationEngine::compute_correlations(&food, &symptom)
    }

    /// Correlations grouped per food
    #[must_use]
    pub fn summaries(&self) -> Vec<CorrelationSummary> {
        CorrelationSummarizer::summarize(&self.compute_correlations())
    }

    /// Shared busy flag
    #[must_use]
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// True while an analysis is running
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// User-facing message of the last failed analysis
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_last_error(&self, message: Option<String>) {
        *self.last_error.write().unwrap_or_else(PoisonError::into_inner) = message;
    }

    /// Narrate the last 30 days of the journal
    ///
    /// # Errors
    ///
    /// Returns the gateway's error, or a malformed-output error for an empty
    /// report; [`Self::last_error`] then holds a user-facing message
    #[instrument(skip(self))]
    pub async fn analyze(&self) -> AppResult<AnalysisResult> {
        let _busy = self.busy.enter();
        self.set_last_error(None);

        match self.run_analysis().await {
            Ok(result) => {
                info!(chars = result.report.len(), "analysis generated");
                Ok(result)
            }
            Err(e) => {
                let message = if e.provider().is_some() {
                    e.user_message()
                } else {
                    GENERIC_ANALYSIS_ERROR.to_owned()
                };
                error!(error = %e, "analysis failed");
                self.set_last_error(Some(message));
                Err(e)
            }
        }
    }

    async fn run_analysis(&self) -> AppResult<AnalysisResult> {
        let payload = self.with_snapshot(|snapshot| {
            CorrelationEngine::build_payload(Utc::now(), snapshot)
        });
        let data_json = serde_json::to_string_pretty(&payload)?;

        let report = self.gateway.analyze_correlations(&data_json).await?;
        if report.trim().is_empty() {
            let provider = self.gateway.active_provider_id();
            return Err(AppError::malformed_output(
                provider.as_str(),
                format!("{} returned an empty report", provider.display_name()),
            ));
        }

        Ok(AnalysisResult {
            report,
            generated_at: Utc::now(),
        })
    }
}
