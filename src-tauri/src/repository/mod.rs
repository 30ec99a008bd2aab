//! Repository Layer
//!
//! JSON-file storage for progress records and app settings.

mod backup;
mod json_file;
mod progress_repo;
mod settings_repo;
pub(crate) mod traits;

#[cfg(test)]
mod tests;

pub use progress_repo::JsonProgressRepository;
pub use settings_repo::SettingsStore;
pub use traits::ProgressRepository;
