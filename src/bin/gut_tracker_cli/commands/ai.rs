// ABOUTME: AI commands for the gut-tracker CLI
// ABOUTME: Photo recognition, FODMAP scoring and dictation parsing through the gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gut_tracker::errors::{AppError, AppResult};
use gut_tracker::models::VoiceContext;
use gut_tracker::voice::VoiceEntryParser;
use tokio::fs;
use tracing::info;

use crate::helpers::display::print_json;
use crate::AppContext;

/// MIME type for an image path, from its extension
fn guess_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Recognize the foods on a photo
pub async fn recognize(ctx: &AppContext, image: &Path, mime: Option<&str>) -> AppResult<()> {
    let mime_type = match mime {
        Some(mime) => mime.to_owned(),
        None => guess_mime(image)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "cannot guess the image type of {}, pass --mime",
                    image.display()
                ))
            })?
            .to_owned(),
    };

    let bytes = fs::read(image).await?;
    info!(path = %image.display(), bytes = bytes.len(), mime = %mime_type, "recognizing foods");
    let result = ctx
        .gateway
        .recognize_food(&STANDARD.encode(bytes), &mime_type)
        .await?;

    if result.foods.is_empty() {
        eprintln!("No food recognized");
    }
    print_json(&result)
}

/// Score the FODMAP content of foods
pub async fn fodmap(ctx: &AppContext, foods: &[String]) -> AppResult<()> {
    let result = ctx.gateway.analyze_fodmap(foods).await?;
    if result.global_estimate().is_none() {
        eprintln!("No FODMAP score in the answer");
    }
    print_json(&result)
}

/// Parse a dictated transcript
pub async fn voice(ctx: &AppContext, transcript: &str, context: VoiceContext) -> AppResult<()> {
    let parser = VoiceEntryParser::new(ctx.gateway.clone());
    let result = parser.parse(transcript, context).await?;
    if result.data.is_empty() {
        eprintln!("Nothing recognized in the transcript");
    }
    print_json(&result)
}
