// ABOUTME: In-memory repository backed by a vector behind an async RwLock
// ABOUTME: Used by tests and by callers that bring their own persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use gut_tracker_core::errors::AppResult;
use gut_tracker_core::traits::Entity;
use tokio::sync::RwLock;

use super::{upsert, Repository};

/// Repository holding records in memory; clones share the same records
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T> InMemoryRepository<T> {
    /// Empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with `records`
    #[must_use]
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync,
{
    async fn find_all(&self) -> AppResult<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned())
    }

    async fn save(&self, entity: T) -> AppResult<T> {
        upsert(&mut *self.records.write().await, &entity);
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.records.write().await.retain(|record| record.id() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gut_tracker_core::models::{Medication, MedicationEntry, MedicationType};

    fn entry(name: &str) -> MedicationEntry {
        MedicationEntry::new(Utc::now(), vec![Medication::new(name, MedicationType::Enzyme)])
    }

    #[tokio::test]
    async fn test_upsert_keeps_position() -> AppResult<()> {
        let repo = InMemoryRepository::new();
        let first = repo.save(entry("Lactase")).await?;
        repo.save(entry("Simethicone")).await?;

        let mut replaced = first.clone();
        replaced.medications[0].name = "Lactase 9000".to_owned();
        repo.save(replaced).await?;

        let all = repo.find_all().await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].medications[0].name, "Lactase 9000");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() -> AppResult<()> {
        let repo: InMemoryRepository<MedicationEntry> = InMemoryRepository::new();
        repo.delete("nope").await?;
        assert!(repo.find_by_id("nope").await?.is_none());
        Ok(())
    }
}
