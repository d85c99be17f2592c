// ABOUTME: Shared test utilities for the gut_tracker integration tests
// ABOUTME: Journal entry builders, timestamp parsing and a scripted AiProvider stub
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `gut_tracker`

use std::env;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use gut_tracker::busy::BusyFlag;
use gut_tracker::config::AiProviderId;
use gut_tracker::errors::{AppError, AppResult};
use gut_tracker::gateway::AiGateway;
use gut_tracker::llm::{AiCapabilities, AiProvider};
use gut_tracker::models::{
    Food, FoodEntry, MealType, Medication, MedicationEntry, MedicationType, Severity, Symptom,
    SymptomEntry, SymptomType,
};
use tokio::task::yield_now;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Journal builders
// ============================================================================

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

/// Local noon `days_ago` calendar days before today, in UTC
pub fn local_noon(days_ago: i64) -> DateTime<Utc> {
    let date = Local::now().date_naive() - Duration::days(days_ago);
    Local
        .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}

pub fn meal(time: DateTime<Utc>, names: &[&str]) -> FoodEntry {
    FoodEntry::new(
        time,
        MealType::Lunch,
        names.iter().map(|name| Food::new(*name)).collect(),
    )
}

pub fn symptom_entry(time: DateTime<Utc>, symptom_type: SymptomType, severity: u8) -> SymptomEntry {
    SymptomEntry::new(
        time,
        vec![Symptom::new(symptom_type, Severity::new(severity).unwrap())],
    )
}

pub fn medication_entry(time: DateTime<Utc>, name: &str, dose: &str) -> MedicationEntry {
    MedicationEntry::new(
        time,
        vec![Medication::new(name, MedicationType::Enzyme).with_dose(dose)],
    )
}

// ============================================================================
// Scripted provider
// ============================================================================

/// Prompt pair received by the stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPrompt {
    pub prompt: String,
    pub system_prompt: Option<String>,
}

type Responder = Box<dyn Fn() -> AppResult<String> + Send + Sync>;

/// Provider answering every call from a script, recording what it saw
pub struct StubProvider {
    id: AiProviderId,
    respond: Responder,
    watched: Mutex<Option<BusyFlag>>,
    busy_seen: Mutex<Vec<bool>>,
    prompts: Mutex<Vec<RecordedPrompt>>,
}

impl StubProvider {
    pub fn answering(text: &str) -> Arc<Self> {
        let text = text.to_owned();
        Self::scripted(Box::new(move || Ok(text.clone())))
    }

    pub fn failing(make_error: fn() -> AppError) -> Arc<Self> {
        Self::scripted(Box::new(move || Err(make_error())))
    }

    fn scripted(respond: Responder) -> Arc<Self> {
        Arc::new(Self {
            id: AiProviderId::OpenAi,
            respond,
            watched: Mutex::new(None),
            busy_seen: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Record the state of `flag` during every call
    pub fn watch(&self, flag: BusyFlag) {
        *self.watched.lock().unwrap() = Some(flag);
    }

    pub fn busy_seen(&self) -> Vec<bool> {
        self.busy_seen.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<RecordedPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    fn answer(&self, prompt: &str, system_prompt: Option<&str>) -> AppResult<String> {
        if let Some(flag) = self.watched.lock().unwrap().as_ref() {
            self.busy_seen.lock().unwrap().push(flag.is_busy());
        }
        self.prompts.lock().unwrap().push(RecordedPrompt {
            prompt: prompt.to_owned(),
            system_prompt: system_prompt.map(str::to_owned),
        });
        (self.respond)()
    }
}

#[async_trait]
impl AiProvider for StubProvider {
    fn id(&self) -> AiProviderId {
        self.id
    }

    fn capabilities(&self) -> AiCapabilities {
        AiCapabilities::cloud_vision()
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> AppResult<String> {
        yield_now().await;
        self.answer(prompt, system_prompt)
    }

    async fn analyze_image(
        &self,
        _image_base64: &str,
        prompt: &str,
        _mime_type: &str,
    ) -> AppResult<String> {
        yield_now().await;
        self.answer(prompt, None)
    }
}

/// Gateway bound to `stub`, with the stub watching the gateway's busy flag
pub fn stub_gateway(stub: &Arc<StubProvider>) -> Arc<AiGateway> {
    let provider: Arc<dyn AiProvider> = Arc::clone(stub) as Arc<dyn AiProvider>;
    let gateway = Arc::new(AiGateway::with_provider(provider));
    stub.watch(gateway.busy_flag());
    gateway
}
