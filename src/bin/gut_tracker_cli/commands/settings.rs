// ABOUTME: Provider settings commands for the gut-tracker CLI
// ABOUTME: Show the effective settings, select a provider and update per-provider values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gut_tracker::config::{AiProviderId, AppConfig};
use gut_tracker::errors::AppResult;
use tracing::info;

use crate::helpers::display::display_settings;

/// Show stored settings with environment overrides applied
pub async fn show(config: &AppConfig) -> AppResult<()> {
    let settings = config.load_ai_settings().await?;
    display_settings(&settings);
    println!("\nStored in {}", config.settings_store().path().display());
    Ok(())
}

/// Select and persist the active provider
///
/// Unknown ids are rejected with a configuration error before anything is written.
pub async fn select(config: &AppConfig, provider: &str) -> AppResult<()> {
    let id: AiProviderId = provider.parse()?;
    let store = config.settings_store();
    let mut settings = store.load().await;
    settings.selected_provider = id;
    store.save(&settings).await?;

    info!(provider = %id, "provider selected");
    println!("Selected {} ({})", id, id.display_name());
    if id.requires_api_key() && settings.providers.get(id).usable_api_key().is_none() {
        println!(
            "No API key stored for {id}; set one with `gut-tracker settings configure {id} --api-key ...`"
        );
    }
    Ok(())
}

/// Update and persist one provider's settings
pub async fn configure(
    config: &AppConfig,
    provider: AiProviderId,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
) -> AppResult<()> {
    let store = config.settings_store();
    let mut settings = store.load().await;
    let entry = settings.providers.get_mut(provider);
    if let Some(api_key) = api_key {
        entry.api_key = Some(api_key);
    }
    if let Some(model) = model {
        entry.model = model;
    }
    if let Some(base_url) = base_url {
        entry.base_url = Some(base_url).filter(|url| !url.trim().is_empty());
    }
    store.save(&settings).await?;

    info!(provider = %provider, "provider settings updated");
    display_settings(&settings);
    Ok(())
}
