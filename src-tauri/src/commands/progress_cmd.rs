//! Tauri Commands for Progress tracking
//!
//! Exposes the progress store to the frontend via Tauri IPC.

use serde::Deserialize;
use tauri::State;

use super::results::StatusMessage;
use crate::domain::{DomainError, MediaType, ProgressMap, ProgressRecord};
use crate::repository::ProgressRepository;
use crate::AppState;

/// Payload of `track_show`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub name: String,
    pub season: i64,
    pub episode: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

impl TrackRequest {
    fn record(&self) -> ProgressRecord {
        let media_type = self
            .media_type
            .as_deref()
            .map(MediaType::from_str)
            .unwrap_or_default();
        ProgressRecord::new(
            self.season,
            self.episode,
            self.notes.clone().unwrap_or_default(),
            media_type,
        )
    }
}

pub async fn track(repo: &dyn ProgressRepository, show: TrackRequest) -> StatusMessage {
    match repo.upsert(&show.name, show.record()).await {
        Ok(update) => StatusMessage::ok(update.message()),
        Err(DomainError::InvalidInput(msg)) | Err(DomainError::Corrupted(msg)) => {
            StatusMessage::failed(msg)
        }
        Err(e) => StatusMessage::failed(format!("Error saving progress for '{}': {}", show.name, e)),
    }
}

pub async fn delete(repo: &dyn ProgressRepository, title: &str) -> StatusMessage {
    match repo.remove(title).await {
        Ok(_) => StatusMessage::ok(format!("Successfully removed '{}' from your watch list!", title)),
        Err(DomainError::NotFound(_)) => {
            StatusMessage::failed(format!("Show '{}' not found in your watch list!", title))
        }
        Err(DomainError::Corrupted(msg)) => StatusMessage::failed(msg),
        Err(_) => StatusMessage::failed(format!("Error removing '{}'.", title)),
    }
}

pub async fn save_all(repo: &dyn ProgressRepository, data: &ProgressMap) -> bool {
    repo.save(data).await.is_ok()
}

/// Load every tracked title
#[tauri::command]
pub async fn load_progress(state: State<'_, AppState>) -> Result<ProgressMap, String> {
    let repo = state.progress_repo.lock().await;
    Ok(repo.load().await)
}

/// Replace the whole store; false when it could not be written
#[tauri::command]
pub async fn save_progress(state: State<'_, AppState>, data: ProgressMap) -> Result<bool, String> {
    let repo = state.progress_repo.lock().await;
    Ok(save_all(&*repo, &data).await)
}

/// Record the current position for a title
#[tauri::command]
pub async fn track_show(state: State<'_, AppState>, show: TrackRequest) -> Result<StatusMessage, String> {
    let repo = state.progress_repo.lock().await;
    Ok(track(&*repo, show).await)
}

/// Stop tracking a title
#[tauri::command]
pub async fn delete_show(state: State<'_, AppState>, show_name: String) -> Result<StatusMessage, String> {
    let repo = state.progress_repo.lock().await;
    Ok(delete(&*repo, &show_name).await)
}
