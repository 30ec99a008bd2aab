//! App Settings
//!
//! Display preferences persisted next to the progress file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Compact window layout
    #[serde(default)]
    pub minimal_mode: bool,
}

impl AppSettings {
    /// Window size matching the current display mode
    pub fn window_preset(&self) -> WindowPreset {
        WindowPreset::for_mode(self.minimal_mode)
    }
}

/// Fixed logical window sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPreset {
    Normal,
    Minimal,
}

impl WindowPreset {
    pub fn for_mode(minimal: bool) -> Self {
        if minimal {
            WindowPreset::Minimal
        } else {
            WindowPreset::Normal
        }
    }

    /// (width, height)
    pub fn size(&self) -> (u32, u32) {
        match self {
            WindowPreset::Normal => (1000, 800),
            WindowPreset::Minimal => (420, 640),
        }
    }
}

/// Host window that can be resized to a preset
pub trait WindowResizer: Send + Sync {
    fn resize(&self, width: u32, height: u32) -> Result<(), String>;

    fn apply_preset(&self, preset: WindowPreset) -> Result<(), String> {
        let (width, height) = preset.size();
        self.resize(width, height)
    }
}
