//! Progress Repository
//!
//! Keeps the title map in a single JSON document. Nothing is cached: each
//! operation reads the file, applies its change and writes it back.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use super::backup;
use super::json_file;
use super::traits::{ImportSummary, ProgressRepository};
use crate::domain::{
    DomainError, DomainResult, ImportError, ProgressChange, ProgressMap, ProgressRecord,
    ProgressUpdate,
};

const EMPTY_STORE: &str = "{}";

pub struct JsonProgressRepository {
    path: PathBuf,
}

impl JsonProgressRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store, creating it empty on first run.
    ///
    /// Unlike `load`, a corrupt file or entry is an error here, so writers
    /// never replace a store they could not fully read.
    pub async fn try_load(&self) -> DomainResult<ProgressMap> {
        let (map, skipped) = self.read_entries().await.map_err(|e| match e {
            DomainError::Serialization(detail) => unreadable_store(&detail),
            other => other,
        })?;
        if let Some((title, reason)) = skipped.first() {
            return Err(unreadable_store(&format!("entry '{}': {}", title, reason)));
        }
        Ok(map)
    }

    /// Valid records plus the titles whose records could not be read
    async fn read_entries(&self) -> DomainResult<(ProgressMap, Vec<(String, String)>)> {
        if json_file::ensure_file(&self.path, EMPTY_STORE).await? {
            log::info!("Created progress store at {}", self.path.display());
        }
        let value: Value = json_file::read_json(&self.path).await?;
        let Value::Object(object) = value else {
            return Err(DomainError::Serialization(
                "expected a map of titles to progress records".to_string(),
            ));
        };
        Ok(ProgressMap::from_object_lossy(object))
    }
}

fn unreadable_store(detail: &str) -> DomainError {
    DomainError::Corrupted(format!(
        "Progress file is unreadable ({}). Import a backup to restore it.",
        detail
    ))
}

#[async_trait]
impl ProgressRepository for JsonProgressRepository {
    async fn load(&self) -> ProgressMap {
        match self.read_entries().await {
            Ok((map, skipped)) => {
                for (title, reason) in &skipped {
                    log::warn!(
                        "Skipping unreadable entry '{}' in {}: {}",
                        title,
                        self.path.display(),
                        reason
                    );
                }
                map
            }
            Err(e) => {
                log::error!("Error loading progress from {}: {}", self.path.display(), e);
                ProgressMap::new()
            }
        }
    }

    async fn save(&self, map: &ProgressMap) -> DomainResult<()> {
        json_file::write_json(&self.path, map).await.map_err(|e| {
            log::error!("Error saving progress to {}: {}", self.path.display(), e);
            e
        })
    }

    async fn upsert(&self, title: &str, record: ProgressRecord) -> DomainResult<ProgressUpdate> {
        if title.trim().is_empty() {
            return Err(DomainError::InvalidInput("Title cannot be empty".to_string()));
        }

        let mut map = self.try_load().await?;
        let previous = map.insert(title.to_string(), record.clone());
        self.save(&map).await?;

        let change = ProgressChange::between(previous.map(|p| p.position()), record.position());
        Ok(ProgressUpdate {
            title: title.to_string(),
            record,
            change,
        })
    }

    async fn remove(&self, title: &str) -> DomainResult<ProgressRecord> {
        let mut map = self.try_load().await?;
        let removed = map
            .remove(title)
            .ok_or_else(|| DomainError::NotFound(title.to_string()))?;
        self.save(&map).await?;
        Ok(removed)
    }

    async fn backup(&self) -> DomainResult<PathBuf> {
        match backup::create_backup(&self.path, Utc::now()).await {
            Ok(file) => {
                log::info!("Backed up progress to {}", file.display());
                Ok(file)
            }
            Err(e) => {
                log::error!("Error creating backup of {}: {}", self.path.display(), e);
                Err(e)
            }
        }
    }

    async fn import_from(&self, path: &Path) -> Result<ImportSummary, ImportError> {
        json_file::ensure_file(&self.path, EMPTY_STORE)
            .await
            .map_err(ImportError::SafetyBackup)?;
        let safety_backup = self.backup().await.map_err(ImportError::SafetyBackup)?;

        let value: Value = json_file::read_json(path).await.map_err(|e| {
            log::error!("Error importing backup {}: {}", path.display(), e);
            ImportError::Read(e)
        })?;
        let Value::Object(object) = value else {
            return Err(ImportError::InvalidFormat(None));
        };
        let map = ProgressMap::from_object(object).map_err(|e| match e {
            DomainError::InvalidInput(detail) => ImportError::InvalidFormat(Some(detail)),
            other => ImportError::InvalidFormat(Some(other.to_string())),
        })?;

        self.save(&map).await.map_err(ImportError::Save)?;
        log::info!(
            "Imported {} titles from {} (previous data in {})",
            map.len(),
            path.display(),
            safety_backup.display()
        );

        Ok(ImportSummary {
            entries: map.len(),
            safety_backup,
        })
    }
}
