// ABOUTME: AI gateway exposing the domain operations over the selected provider
// ABOUTME: Food recognition, FODMAP scoring, dictation parsing and correlation narration with a busy signal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # AI Gateway
//!
//! [`AiGateway`] resolves the active provider from [`AiSettings`] on every call
//! and wraps it with the fixed prompts of each operation.
//!
//! Recognition and FODMAP scoring degrade to a neutral result when the model's
//! text holds no usable JSON. Transport, authentication and quota errors are
//! never swallowed.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use gut_tracker_core::errors::AppResult;
use gut_tracker_core::models::{FodmapAnalysisResult, ImageRecognitionResult, VoiceContext};
use tracing::{debug, info, instrument, warn};

use crate::busy::BusyFlag;
use crate::config::{AiProviderId, AiSettings};
use crate::llm::prompts::{
    correlation_user_prompt, fodmap_user_prompt, voice_system_prompt,
    CORRELATION_ANALYSIS_SYSTEM_PROMPT, FODMAP_SYSTEM_PROMPT, FOOD_RECOGNITION_PROMPT,
};
use crate::llm::{extract_json, AiProvider, ChatProvider, JsonExtraction};

/// Gateway over the configured AI provider
pub struct AiGateway {
    settings: RwLock<AiSettings>,
    fixed_provider: Option<Arc<dyn AiProvider>>,
    busy: BusyFlag,
}

impl AiGateway {
    /// Gateway that builds its provider from `settings`
    #[must_use]
    pub fn new(settings: AiSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
            fixed_provider: None,
            busy: BusyFlag::new(),
        }
    }

    /// Gateway bound to one provider instance; settings changes do not affect it
    #[must_use]
    pub fn with_provider(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            settings: RwLock::new(AiSettings::default()),
            fixed_provider: Some(provider),
            busy: BusyFlag::new(),
        }
    }

    /// Current settings
    #[must_use]
    pub fn settings(&self) -> AiSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the settings used for later calls
    pub fn set_settings(&self, settings: AiSettings) {
        info!(provider = %settings.selected_provider, "AI settings updated");
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }

    /// Select the active provider by identifier
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `provider_id` names no known provider
    pub fn select_provider(&self, provider_id: &str) -> AppResult<AiProviderId> {
        let id: AiProviderId = provider_id.parse()?;
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .selected_provider = id;
        info!(provider = %id, "AI provider selected");
        Ok(id)
    }

    /// Identifier of the provider the next call will use
    #[must_use]
    pub fn active_provider_id(&self) -> AiProviderId {
        self.provider().id()
    }

    /// Shared busy flag, for observing the gateway from another task
    #[must_use]
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// True while any gateway call is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    fn provider(&self) -> Arc<dyn AiProvider> {
        if let Some(provider) = &self.fixed_provider {
            return Arc::clone(provider);
        }
        let settings = self.settings.read().unwrap_or_else(PoisonError::into_inner);
        Arc::new(ChatProvider::from_settings(&settings))
    }

    /// Identify the foods visible in a photo
    ///
    /// Returns the empty result when the answer holds no parseable JSON.
    ///
    /// # Errors
    ///
    /// Returns the provider's error for configuration, transport, authentication,
    /// quota and status failures
    #[instrument(skip(self, image_base64), fields(bytes = image_base64.len()))]
    pub async fn recognize_food(
        &self,
        image_base64: &str,
        mime_type: &str,
    ) -> AppResult<ImageRecognitionResult> {
        let _busy = self.busy.enter();
        let provider = self.provider();
        let text = provider
            .analyze_image(image_base64, FOOD_RECOGNITION_PROMPT, mime_type)
            .await?;

        match extract_json::<ImageRecognitionResult>(&text) {
            JsonExtraction::Extracted(result) => {
                debug!(foods = result.foods.len(), "food recognition parsed");
                Ok(result)
            }
            JsonExtraction::NotFound => {
                warn!(provider = %provider.id(), "food recognition answer holds no JSON");
                Ok(ImageRecognitionResult::default())
            }
            JsonExtraction::Invalid(reason) => {
                warn!(provider = %provider.id(), reason = %reason, "food recognition JSON rejected");
                Ok(ImageRecognitionResult::default())
            }
        }
    }

    /// Score the FODMAP content of a list of foods
    ///
    /// Returns a result without any score, carrying the raw answer as advice,
    /// when it holds no parseable JSON.
    ///
    /// # Errors
    ///
    /// Returns the provider's error for configuration, transport, authentication,
    /// quota and status failures
    #[instrument(skip(self), fields(foods = food_names.len()))]
    pub async fn analyze_fodmap(&self, food_names: &[String]) -> AppResult<FodmapAnalysisResult> {
        let _busy = self.busy.enter();
        let provider = self.provider();
        let text = provider
            .complete(&fodmap_user_prompt(food_names), Some(FODMAP_SYSTEM_PROMPT))
            .await?;

        match extract_json::<FodmapAnalysisResult>(&text) {
            JsonExtraction::Extracted(result) => Ok(result),
            JsonExtraction::NotFound => {
                warn!(provider = %provider.id(), "FODMAP answer holds no JSON");
                Ok(FodmapAnalysisResult::fallback(text))
            }
            JsonExtraction::Invalid(reason) => {
                warn!(provider = %provider.id(), reason = %reason, "FODMAP JSON rejected");
                Ok(FodmapAnalysisResult::fallback(text))
            }
        }
    }

    /// Turn a dictated transcript into the model's raw structured answer
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged
    #[instrument(skip(self, transcript), fields(context = %context))]
    pub async fn parse_voice_transcript(
        &self,
        transcript: &str,
        context: VoiceContext,
    ) -> AppResult<String> {
        let _busy = self.busy.enter();
        self.provider()
            .complete(transcript, Some(voice_system_prompt(context)))
            .await
    }

    /// Narrate the correlation payload
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged
    #[instrument(skip(self, data_json), fields(bytes = data_json.len()))]
    pub async fn analyze_correlations(&self, data_json: &str) -> AppResult<String> {
        let _busy = self.busy.enter();
        self.provider()
            .complete(
                &correlation_user_prompt(data_json),
                Some(CORRELATION_ANALYSIS_SYSTEM_PROMPT),
            )
            .await
    }
}

impl fmt::Debug for AiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiGateway")
            .field("fixed_provider", &self.fixed_provider.as_ref().map(|p| p.id()))
            .field("busy", &self.busy.in_flight())
            .finish_non_exhaustive()
    }
}
