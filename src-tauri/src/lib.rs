//! Media Progress Backend
//!
//! Layered architecture:
//! - domain: Progress records, media types and settings
//! - repository: JSON file stores
//! - commands: Tauri command handlers

use std::path::PathBuf;
use tauri::Manager;
use tokio::sync::Mutex;

mod commands;
mod domain;
mod repository;

use domain::WindowResizer;
use repository::{JsonProgressRepository, SettingsStore};

/// Label of the single app window
pub const MAIN_WINDOW: &str = "main";

const PROGRESS_FILE: &str = "tv_show_progress.json";
const SETTINGS_FILE: &str = "app_settings.json";
const LOG_NAME: &str = "MediaProgress";

/// Application state shared across commands
pub struct AppState {
    pub progress_repo: Mutex<JsonProgressRepository>,
    pub settings: SettingsStore,
    pub data_dir: PathBuf,
}

/// Get (and create) the app data directory
fn get_data_dir(app_handle: &tauri::AppHandle) -> Result<PathBuf, String> {
    let app_dir = app_handle
        .path()
        .app_data_dir()
        .map_err(|e| format!("Failed to get app data dir: {}", e))?;
    std::fs::create_dir_all(&app_dir)
        .map_err(|e| format!("Failed to create {}: {}", app_dir.display(), e))?;
    Ok(app_dir)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let dev_mode = std::env::args().any(|arg| arg == "--dev");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
                    let _ = window.unminimize();
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();
            rolling_logger::init_logger(app_handle.path().app_log_dir()?, LOG_NAME)?;
            if let Some(file) = rolling_logger::log_file() {
                let _ = rolling_logger::info(&format!("Logging to {}", file.display()));
            }

            let data_dir = get_data_dir(&app_handle)?;
            log::info!("App setup starting, data in {}", data_dir.display());

            let settings = tauri::async_runtime::block_on(SettingsStore::open(
                data_dir.join(SETTINGS_FILE),
            ));
            let current = tauri::async_runtime::block_on(settings.current());
            log::info!(
                "Settings loaded from {} (minimal mode: {})",
                settings.path().display(),
                current.minimal_mode
            );

            match app.get_webview_window(MAIN_WINDOW) {
                Some(window) => {
                    if current.minimal_mode {
                        if let Err(e) = window.apply_preset(current.window_preset()) {
                            let _ = rolling_logger::warn(&format!(
                                "Failed to apply window preset: {}",
                                e
                            ));
                        }
                    }
                    if dev_mode {
                        window.open_devtools();
                    }
                }
                None => {
                    let _ = rolling_logger::error(&format!("Window '{}' not found", MAIN_WINDOW));
                }
            }

            let progress_repo = JsonProgressRepository::new(data_dir.join(PROGRESS_FILE));
            log::info!("Progress store at {}", progress_repo.path().display());

            app.manage(AppState {
                progress_repo: Mutex::new(progress_repo),
                settings,
                data_dir,
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Progress
            commands::load_progress,
            commands::save_progress,
            commands::track_show,
            commands::delete_show,
            // Backups
            commands::create_backup,
            commands::import_backup,
            commands::select_backup_file,
            // Shell
            commands::open_external_url,
            // Window & settings
            commands::set_minimal_mode,
            commands::get_app_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
