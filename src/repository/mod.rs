// ABOUTME: Repository abstraction for journal collections
// ABOUTME: Async keyed read/upsert/delete contract with in-memory and JSON file backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Keyed persistence for journal entries.
//!
//! `save` is an upsert by id: an existing record is replaced in place, a new
//! one is appended, so `find_all` keeps insertion order.

mod json_file;
mod memory;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;

use async_trait::async_trait;
use gut_tracker_core::errors::AppResult;
use gut_tracker_core::traits::Entity;

/// Persistence contract for one collection
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Entity + Clone + Send + Sync,
{
    /// Every record, in insertion order
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// Record with `id`, if any
    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>>;

    /// Insert or fully replace the record with the entity's id
    async fn save(&self, entity: T) -> AppResult<T>;

    /// Remove the record with `id`; removing an absent id is not an error
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Replace the record sharing `entity`'s id, or append it
pub(crate) fn upsert<T: Entity + Clone>(records: &mut Vec<T>, entity: &T) {
    match records.iter_mut().find(|record| record.id() == entity.id()) {
        Some(existing) => *existing = entity.clone(),
        None => records.push(entity.clone()),
    }
}
