// ABOUTME: Correlation engine for food, symptom and medication journals
// ABOUTME: Synchronous computations over in-memory snapshots; never touches the network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # GutTracker Intelligence
//!
//! The pure half of correlation analysis. Every function here takes the
//! current journal snapshot and returns a value; nothing suspends, nothing is
//! cached between calls.
//!
//! - **correlation**: windowed food -> symptom join, distinct-day gating, 30-day payload
//! - **summary**: per-food aggregation of correlation points for compact display

/// Windowed join, day counting and payload building
pub mod correlation;

/// Per-food aggregation of correlation points
pub mod summary;

pub use correlation::{CorrelationEngine, JournalSnapshot};
pub use summary::{CorrelationSummary, CorrelationSummarizer};
