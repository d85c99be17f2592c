// ABOUTME: Main library entry point for the GutTracker journal and analysis platform
// ABOUTME: AI provider gateway, correlation analysis service, journal stores, export and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # GutTracker
//!
//! Food, symptom and medication journal with AI-assisted food recognition,
//! FODMAP scoring, dictation parsing and temporal food/symptom correlation.
//!
//! ## Architecture
//!
//! - **`llm`**: one adapter per AI provider behind the `AiProvider` trait
//! - **`gateway`**: domain operations over the selected provider
//! - **`analysis`**: correlation engine bound to the journal stores
//! - **`stores`** / **`repository`**: cached collections over keyed persistence
//! - **`voice`** / **`export`**: dictation parsing and JSON/CSV export
//! - **`config`** / **`logging`**: environment-driven configuration
//!
//! Domain models and the error type live in `gut-tracker-core`; the pure
//! correlation maths in `gut-tracker-intelligence`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gut_tracker::analysis::AnalysisService;
//! use gut_tracker::config::AppConfig;
//! use gut_tracker::errors::AppResult;
//! use gut_tracker::gateway::AiGateway;
//! use gut_tracker::stores::Journal;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let journal = Journal::open(&config.data_dir);
//!     journal.load_all().await?;
//!
//!     let gateway = Arc::new(AiGateway::new(config.load_ai_settings().await?));
//!     let analysis = AnalysisService::new(gateway, journal);
//!     if analysis.can_analyze() {
//!         println!("{}", analysis.analyze().await?.report);
//!     }
//!     Ok(())
//! }
//! ```

/// Correlation analysis service
pub mod analysis;

/// In-flight call tracking
pub mod busy;

/// Configuration management
pub mod config;

/// JSON and CSV export
pub mod export;

/// AI gateway
pub mod gateway;

/// AI provider adapters
pub mod llm;

/// Logging setup
pub mod logging;

/// Keyed persistence
pub mod repository;

/// Cached journal stores
pub mod stores;

/// Dictation parsing
pub mod voice;

pub use gut_tracker_core::{constants, errors, models};
pub use gut_tracker_intelligence as intelligence;
