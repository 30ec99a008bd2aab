//! JSON File Access
//!
//! Shared read/write helpers for the stores' JSON documents.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use crate::domain::DomainResult;

/// Create `path` with `initial` contents if it does not exist yet.
///
/// Returns true when the file was created.
pub async fn ensure_file(path: &Path, initial: &str) -> DomainResult<bool> {
    if fs::try_exists(path).await? {
        return Ok(false);
    }
    create_parent(path).await?;
    fs::write(path, initial).await?;
    Ok(true)
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> DomainResult<T> {
    let text = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Overwrite `path` with `value` as 2-space indented JSON
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> DomainResult<()> {
    let text = serde_json::to_string_pretty(value)?;
    create_parent(path).await?;
    fs::write(path, text).await?;
    Ok(())
}

async fn create_parent(path: &Path) -> DomainResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}
