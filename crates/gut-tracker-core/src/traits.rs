// ABOUTME: Identity and timestamp contracts implemented by every journal entry
// ABOUTME: Used by repositories for keyed upserts and by the engine for time filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A record addressable by a stable string id
pub trait Entity {
    /// Unique identifier
    fn id(&self) -> &str;
}

/// A record anchored to a single instant
pub trait Timestamped {
    /// Instant the record describes
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Generate a new random entity id
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
