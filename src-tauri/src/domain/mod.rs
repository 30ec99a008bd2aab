//! Domain Layer
//!
//! Progress records, media types and app settings.
//! This layer has NO external dependencies (except serde and serde_json for serialization).

mod error;
mod media_type;
mod progress;
mod settings;

pub use error::{DomainError, DomainResult, ImportError};
pub use media_type::MediaType;
pub use progress::{ProgressChange, ProgressMap, ProgressRecord, ProgressUpdate};
pub use settings::{AppSettings, WindowPreset, WindowResizer};
