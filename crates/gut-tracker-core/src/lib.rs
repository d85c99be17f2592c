// ABOUTME: Core types and constants for the GutTracker digestive health platform
// ABOUTME: Foundation crate with error handling, domain models, entity traits, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # GutTracker Core
//!
//! Foundation crate providing shared types and constants for the GutTracker
//! food, symptom and medication journal. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and provider context
//! - **constants**: Correlation window, analysis gating and AI provider defaults
//! - **models**: Journal entries, AI recognition results and derived analysis types
//! - **traits**: `Entity` and `Timestamped`, the contracts repositories and the engine rely on

/// Unified error handling system with standard error codes and provider context
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`FoodEntry`, `SymptomEntry`, `MedicationEntry`, AI results)
pub mod models;

/// Identity and time contracts shared by every journal entry
pub mod traits;

pub use errors::{AppError, AppResult, ErrorCode, ErrorContext};
pub use traits::{Entity, Timestamped};
