//! Window & Settings Commands
//!
//! Tauri commands for the display settings and the window sizes they imply.

use tauri::{AppHandle, Manager, Runtime, State, WebviewWindow};

use super::results::ActionResult;
use crate::domain::{AppSettings, WindowResizer};
use crate::repository::SettingsStore;
use crate::{AppState, MAIN_WINDOW};

impl<R: Runtime> WindowResizer for WebviewWindow<R> {
    fn resize(&self, width: u32, height: u32) -> Result<(), String> {
        #[cfg(not(any(target_os = "android", target_os = "ios")))]
        {
            // A maximized window ignores set_size
            if self.is_maximized().unwrap_or(false) {
                self.unmaximize().map_err(|e| e.to_string())?;
            }
            self.set_size(tauri::Size::Logical(tauri::LogicalSize {
                width: width as f64,
                height: height as f64,
            }))
            .map_err(|e| e.to_string())?;
        }
        #[cfg(any(target_os = "android", target_os = "ios"))]
        let _ = (width, height);
        Ok(())
    }
}

pub async fn toggle_minimal_mode(
    settings: &SettingsStore,
    enabled: bool,
    window: &dyn WindowResizer,
) -> ActionResult {
    match settings.set_minimal_mode(enabled, window).await {
        Ok(_) => ActionResult::ok(),
        Err(e) => {
            log::error!("Error setting minimal mode: {}", e);
            ActionResult::failed(e.to_string())
        }
    }
}

/// Settings currently in effect; the file is not re-read
pub async fn app_settings(settings: &SettingsStore) -> AppSettings {
    settings.current().await
}

/// Switch minimal mode and resize the main window to match
#[tauri::command]
pub async fn set_minimal_mode(
    app: AppHandle,
    state: State<'_, AppState>,
    enabled: bool,
) -> Result<ActionResult, String> {
    let Some(window) = app.get_webview_window(MAIN_WINDOW) else {
        return Ok(ActionResult::failed("Window not found"));
    };
    Ok(toggle_minimal_mode(&state.settings, enabled, &window).await)
}

/// Settings the window was last set up with
#[tauri::command]
pub async fn get_app_settings(state: State<'_, AppState>) -> Result<AppSettings, String> {
    Ok(app_settings(&state.settings).await)
}
