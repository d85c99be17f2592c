// ABOUTME: File-backed repository storing one collection as a JSON array
// ABOUTME: Missing files read as empty collections; writes replace the whole file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gut_tracker_core::errors::{AppError, AppResult};
use gut_tracker_core::traits::Entity;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::{upsert, Repository};

/// Repository persisting a collection to `<path>` as pretty-printed JSON
#[derive(Debug)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileRepository<T> {
    /// Repository stored at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Repository for `collection` inside `data_dir`, stored as `<collection>.json`
    #[must_use]
    pub fn in_dir(data_dir: &Path, collection: &str) -> Self {
        Self::new(data_dir.join(format!("{collection}.json")))
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> JsonFileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    async fn read_records(&self) -> AppResult<Vec<T>> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::storage(format!("Corrupt collection file {}", self.path.display()))
                    .with_source(e)
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_records(&self, records: &[T]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), records = records.len(), "collection written");
        Ok(())
    }
}

#[async_trait]
impl<T> Repository<T> for JsonFileRepository<T>
where
    T: Entity + Clone + Serialize + DeserializeOwned + Send + Sync,
{
    async fn find_all(&self) -> AppResult<Vec<T>> {
        self.read_records().await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        Ok(self
            .read_records()
            .await?
            .into_iter()
            .find(|record| record.id() == id))
    }

    async fn save(&self, entity: T) -> AppResult<T> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        upsert(&mut records, &entity);
        self.write_records(&records).await?;
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() != before {
            self.write_records(&records).await?;
        }
        Ok(())
    }
}
