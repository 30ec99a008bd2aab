//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for progress storage.
//! The shipped implementation is a JSON file; every call is one
//! read-modify-write transaction against it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{DomainResult, ImportError, ProgressMap, ProgressRecord, ProgressUpdate};

/// What an import replaced the store with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Titles in the imported map
    pub entries: usize,
    /// Copy of the store taken before it was replaced
    pub safety_backup: PathBuf,
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Current map. A missing store is created empty; an unreadable one is
    /// logged and read as empty.
    async fn load(&self) -> ProgressMap;

    /// Overwrite the whole store
    async fn save(&self, map: &ProgressMap) -> DomainResult<()>;

    /// Write `record` for `title`, overwriting any previous record
    async fn upsert(&self, title: &str, record: ProgressRecord) -> DomainResult<ProgressUpdate>;

    /// Delete `title`, returning the removed record
    async fn remove(&self, title: &str) -> DomainResult<ProgressRecord>;

    /// Copy the store file verbatim to a new timestamped backup
    async fn backup(&self) -> DomainResult<PathBuf>;

    /// Replace the store with the contents of `path`, after a safety backup
    async fn import_from(&self, path: &Path) -> Result<ImportSummary, ImportError>;
}
