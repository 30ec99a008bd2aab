//! Backup Commands
//!
//! Creating timestamped backups and importing a backup over the store.

use std::path::Path;

use tauri::State;

use super::results::{BackupResult, StatusMessage};
use crate::repository::ProgressRepository;
use crate::AppState;

pub async fn backup(repo: &dyn ProgressRepository) -> BackupResult {
    match repo.backup().await {
        Ok(file) => BackupResult {
            success: true,
            file: Some(file.to_string_lossy().to_string()),
            error: None,
        },
        Err(e) => BackupResult {
            success: false,
            file: None,
            error: Some(e.to_string()),
        },
    }
}

pub async fn import(repo: &dyn ProgressRepository, path: &Path) -> StatusMessage {
    match repo.import_from(path).await {
        Ok(summary) => {
            let backup_name = summary
                .safety_backup
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            StatusMessage::ok(format!(
                "Backup imported successfully! Previous data backed up to {}",
                backup_name
            ))
        }
        Err(e) => StatusMessage::failed(e.to_string()),
    }
}

/// Copy the progress file to a new timestamped backup
#[tauri::command]
pub async fn create_backup(state: State<'_, AppState>) -> Result<BackupResult, String> {
    let repo = state.progress_repo.lock().await;
    Ok(backup(&*repo).await)
}

/// Replace the store with a backup file (a safety backup is taken first)
#[tauri::command]
pub async fn import_backup(state: State<'_, AppState>, file_path: String) -> Result<StatusMessage, String> {
    let repo = state.progress_repo.lock().await;
    Ok(import(&*repo, Path::new(&file_path)).await)
}
