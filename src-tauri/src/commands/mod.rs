//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod backup_cmd;
mod dialog_cmd;
mod progress_cmd;
mod results;
mod shell_cmd;
mod window_cmd;


pub use backup_cmd::*;
pub use dialog_cmd::*;
pub use progress_cmd::*;
pub use shell_cmd::*;
pub use window_cmd::*;
