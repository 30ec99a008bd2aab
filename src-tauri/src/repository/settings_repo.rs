//! Settings Repository
//!
//! Owns the current `AppSettings` value and its JSON file.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::json_file;
use crate::domain::{AppSettings, DomainError, DomainResult, WindowPreset, WindowResizer};

pub struct SettingsStore {
    path: PathBuf,
    current: Mutex<AppSettings>,
}

impl SettingsStore {
    /// Open the store, reading (or creating) the settings file
    pub async fn open(path: PathBuf) -> Self {
        let store = Self {
            path,
            current: Mutex::new(AppSettings::default()),
        };
        store.load().await;
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file; missing -> defaults written, unreadable -> defaults
    pub async fn load(&self) -> AppSettings {
        let settings = read_or_init(&self.path).await;
        *self.current.lock().await = settings;
        settings
    }

    /// Persist `settings` as the current value. Failures are only logged.
    pub async fn save(&self, settings: AppSettings) {
        *self.current.lock().await = settings;
        if let Err(e) = json_file::write_json(&self.path, &settings).await {
            log::error!("Error saving settings to {}: {}", self.path.display(), e);
        }
    }

    pub async fn current(&self) -> AppSettings {
        *self.current.lock().await
    }

    /// Switch minimal mode, persist it and resize `window` to the matching preset.
    pub async fn set_minimal_mode(
        &self,
        enabled: bool,
        window: &dyn WindowResizer,
    ) -> DomainResult<AppSettings> {
        let mut current = self.current.lock().await;
        let mut updated = *current;
        updated.minimal_mode = enabled;

        json_file::write_json(&self.path, &updated).await?;
        *current = updated;

        // Held through the resize so the window matches the persisted mode
        window
            .apply_preset(WindowPreset::for_mode(enabled))
            .map_err(|e| DomainError::Internal(format!("Failed to resize window: {}", e)))?;

        log::info!("Minimal mode {}", if enabled { "enabled" } else { "disabled" });
        Ok(updated)
    }
}

async fn read_or_init(path: &Path) -> AppSettings {
    let defaults = AppSettings::default();
    match tokio::fs::try_exists(path).await {
        Ok(false) => {
            if let Err(e) = json_file::write_json(path, &defaults).await {
                log::error!("Error creating settings file {}: {}", path.display(), e);
            }
            return defaults;
        }
        Ok(true) => {}
        Err(e) => {
            log::error!("Error checking settings file {}: {}", path.display(), e);
            return defaults;
        }
    }

    match json_file::read_json(path).await {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Error loading settings from {}: {}", path.display(), e);
            defaults
        }
    }
}
