// ABOUTME: Cached entry stores over repositories plus the scoring food-entry service
// ABOUTME: Snapshot reads, full-replacement writes, today/frequent-food views and graceful FODMAP scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Entry Stores
//!
//! An [`EntryStore`] caches one collection in memory after [`EntryStore::load_all`]
//! and keeps the cache in step with every write. Readers get cloned snapshots,
//! so the correlation engine never observes a collection mid-update.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Local, NaiveDate, Utc};
use gut_tracker_core::constants::journal::FREQUENT_FOOD_MIN_ENTRIES;
use gut_tracker_core::errors::AppResult;
use gut_tracker_core::models::{
    FodmapAnalysisResult, FodmapScore, FoodEntry, MedicationEntry, SymptomEntry,
};
use gut_tracker_core::traits::{Entity, Timestamped};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::gateway::AiGateway;
use crate::repository::{InMemoryRepository, JsonFileRepository, Repository};

/// Message recorded when a collection cannot be loaded
const LOAD_ERROR_MESSAGE: &str = "Failed to load entries";

/// Cached view of one collection
pub struct EntryStore<T> {
    repository: Arc<dyn Repository<T>>,
    entries: RwLock<Vec<T>>,
    error: RwLock<Option<String>>,
}

/// Food journal store
pub type FoodStore = EntryStore<FoodEntry>;
/// Symptom journal store
pub type SymptomStore = EntryStore<SymptomEntry>;
/// Medication journal store
pub type MedicationStore = EntryStore<MedicationEntry>;

impl<T> EntryStore<T>
where
    T: Entity + Timestamped + Clone + Send + Sync + 'static,
{
    /// Store over `repository`; empty until [`Self::load_all`] runs
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Self {
            repository,
            entries: RwLock::new(Vec::new()),
            error: RwLock::new(None),
        }
    }

    /// Replace the cache with the repository's contents
    ///
    /// # Errors
    ///
    /// Returns the repository error; [`Self::error`] then holds a message
    pub async fn load_all(&self) -> AppResult<()> {
        *self.error.write().unwrap_or_else(PoisonError::into_inner) = None;
        match self.repository.find_all().await {
            Ok(entries) => {
                debug!(count = entries.len(), "entries loaded");
                *self.entries.write().unwrap_or_else(PoisonError::into_inner) = entries;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load entries");
                *self.error.write().unwrap_or_else(PoisonError::into_inner) =
                    Some(LOAD_ERROR_MESSAGE.to_owned());
                Err(e)
            }
        }
    }

    /// Snapshot of the cached entries, in repository order
    #[must_use]
    pub fn entries(&self) -> Vec<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Message from the last failed load, cleared by the next load
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persist a new entry and append it to the cache
    ///
    /// # Errors
    ///
    /// Returns the repository error; the cache is left untouched
    pub async fn add(&self, entry: T) -> AppResult<T> {
        let saved = self.repository.save(entry).await?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(saved.clone());
        Ok(saved)
    }

    /// Persist a full replacement of an existing entry
    ///
    /// # Errors
    ///
    /// Returns the repository error; the cache is left untouched
    pub async fn update(&self, entry: T) -> AppResult<T> {
        let saved = self.repository.save(entry).await?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.iter_mut().find(|e| e.id() == saved.id()) {
            *existing = saved.clone();
        }
        Ok(saved)
    }

    /// Delete an entry by id
    ///
    /// # Errors
    ///
    /// Returns the repository error; the cache is left untouched
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|e| e.id() != id);
        Ok(())
    }

    /// Entries whose local calendar date is `date`
    #[must_use]
    pub fn entries_on(&self, date: NaiveDate) -> Vec<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.timestamp().with_timezone(&Local).date_naive() == date)
            .cloned()
            .collect()
    }

    /// Entries recorded today, local time
    #[must_use]
    pub fn today_entries(&self) -> Vec<T> {
        self.entries_on(Local::now().date_naive())
    }
}

impl EntryStore<FoodEntry> {
    /// Food names present in at least three entries, in order of first appearance
    #[must_use]
    pub fn frequent_foods(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &*entries {
            let mut seen: HashSet<&str> = HashSet::new();
            for food in &entry.foods {
                let name = food.name.as_str();
                if !seen.insert(name) {
                    continue;
                }
                let count = counts.entry(name).or_insert(0);
                if *count == 0 {
                    order.push(name);
                }
                *count += 1;
            }
        }
        order
            .into_iter()
            .filter(|name| counts.get(name).copied().unwrap_or(0) >= FREQUENT_FOOD_MIN_ENTRIES)
            .map(str::to_owned)
            .collect()
    }
}

// ============================================================================
// Journal
// ============================================================================

/// The three journal collections; clones share the same stores
#[derive(Clone)]
pub struct Journal {
    /// Food entries
    pub food: Arc<FoodStore>,
    /// Symptom entries
    pub symptom: Arc<SymptomStore>,
    /// Medication entries
    pub medication: Arc<MedicationStore>,
}

impl Journal {
    /// Journal persisted as `food.json`, `symptom.json` and `medication.json` in `data_dir`
    #[must_use]
    pub fn open(data_dir: &Path) -> Self {
        Self {
            food: file_store(data_dir, "food"),
            symptom: file_store(data_dir, "symptom"),
            medication: file_store(data_dir, "medication"),
        }
    }

    /// Journal kept in memory only
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            food: memory_store(),
            symptom: memory_store(),
            medication: memory_store(),
        }
    }

    /// Load every collection
    ///
    /// # Errors
    ///
    /// Returns the first repository error
    pub async fn load_all(&self) -> AppResult<()> {
        self.food.load_all().await?;
        self.symptom.load_all().await?;
        self.medication.load_all().await?;
        info!(
            food = self.food.entries().len(),
            symptom = self.symptom.entries().len(),
            medication = self.medication.entries().len(),
            "journal loaded"
        );
        Ok(())
    }
}

fn file_store<T>(data_dir: &Path, collection: &str) -> Arc<EntryStore<T>>
where
    T: Entity + Timestamped + Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let repository: Arc<dyn Repository<T>> =
        Arc::new(JsonFileRepository::<T>::in_dir(data_dir, collection));
    Arc::new(EntryStore::new(repository))
}

fn memory_store<T>() -> Arc<EntryStore<T>>
where
    T: Entity + Timestamped + Clone + Send + Sync + 'static,
{
    let repository: Arc<dyn Repository<T>> = Arc::new(InMemoryRepository::<T>::new());
    Arc::new(EntryStore::new(repository))
}

// ============================================================================
// Food entry scoring
// ============================================================================

/// Saves food entries after an attempt at FODMAP scoring
pub struct FoodEntryService {
    gateway: Arc<AiGateway>,
    store: Arc<FoodStore>,
}

impl FoodEntryService {
    /// Service writing to `store` and scoring through `gateway`
    #[must_use]
    pub const fn new(gateway: Arc<AiGateway>, store: Arc<FoodStore>) -> Self {
        Self { gateway, store }
    }

    /// Score the entry's foods, then store it
    ///
    /// A failed scoring call is logged and the entry is stored unscored.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the entry cannot be stored
    pub async fn save_with_scoring(&self, entry: FoodEntry) -> AppResult<FoodEntry> {
        let names = entry.food_names();
        let entry = if names.is_empty() {
            entry
        } else {
            match self.gateway.analyze_fodmap(&names).await {
                Ok(analysis) => apply_fodmap_analysis(entry, &analysis, Utc::now()),
                Err(e) => {
                    warn!(error = %e.user_message(), "FODMAP scoring failed, saving unscored entry");
                    entry
                }
            }
        };
        self.store.add(entry).await
    }
}

/// Attach per-food scores (matched by case-insensitive name) and the global score
///
/// Foods the analysis does not mention stay unscored, as does the meal when the
/// analysis carries no global level and score.
#[must_use]
pub fn apply_fodmap_analysis(
    mut entry: FoodEntry,
    analysis: &FodmapAnalysisResult,
    analyzed_at: DateTime<Utc>,
) -> FoodEntry {
    for food in &mut entry.foods {
        if let Some(found) = analysis.find(&food.name) {
            let details = [found.main_fodmaps.join(", "), found.notes.clone()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("; ");
            food.fodmap_score = Some(FodmapScore::from_estimate(
                found.fodmap_level,
                found.score,
                details,
                analyzed_at,
            ));
        }
    }
    entry.global_fodmap_score = analysis.global_estimate().map(|(level, score)| {
        FodmapScore::from_estimate(level, score, analysis.advice.clone(), analyzed_at)
    });
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use gut_tracker_core::models::{FodmapAnalysisFood, FodmapLevel, Food, MealType};

    #[test]
    fn test_apply_analysis_matches_case_insensitively() {
        let entry = FoodEntry::new(
            Utc::now(),
            MealType::Lunch,
            vec![Food::new("Poireau"), Food::new("Riz")],
        );
        let analysis = FodmapAnalysisResult {
            foods: vec![FodmapAnalysisFood {
                name: "poireau".to_owned(),
                fodmap_level: FodmapLevel::High,
                score: 8.4,
                main_fodmaps: vec!["fructans".to_owned()],
                notes: String::new(),
            }],
            global_score: Some(6.0),
            global_level: Some(FodmapLevel::Medium),
            advice: "Limit leek".to_owned(),
        };

        let scored = apply_fodmap_analysis(entry, &analysis, Utc::now());
        let leek = scored.foods[0].fodmap_score.as_ref();
        assert_eq!(leek.map(FodmapScore::score), Some(8));
        assert_eq!(leek.map(FodmapScore::details), Some("fructans"));
        assert!(scored.foods[1].fodmap_score.is_none());
        assert_eq!(
            scored.global_fodmap_score.as_ref().map(FodmapScore::level),
            Some(FodmapLevel::Medium)
        );
    }
}
