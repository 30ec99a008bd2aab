use tauri::{command, AppHandle, Runtime, State};
use tauri_plugin_dialog::DialogExt;

use super::results::FileSelection;
use crate::AppState;

/// Pick a JSON backup file, starting in the app data directory
#[command]
pub async fn select_backup_file<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
) -> Result<FileSelection, String> {
    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    {
        let picked = app
            .dialog()
            .file()
            .add_filter("JSON Files", &["json"])
            .set_directory(&state.data_dir)
            .blocking_pick_file();
        match picked {
            Some(path) => Ok(FileSelection {
                canceled: false,
                file_path: Some(path.to_string()),
            }),
            None => Ok(FileSelection {
                canceled: true,
                file_path: None,
            }),
        }
    }
    #[cfg(any(target_os = "android", target_os = "ios"))]
    {
        // Not supported/implemented on mobile for now
        let _ = (app, state);
        Ok(FileSelection {
            canceled: true,
            file_path: None,
        })
    }
}
