//! Domain Layer - Errors
//!
//! Every store operation reports failure through `DomainError`.

use serde::{Deserialize, Serialize};

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    /// Stored data exists but cannot be used
    Corrupted(String),
    Io(String),
    Serialization(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Corrupted(msg) => write!(f, "{}", msg),
            DomainError::Io(msg) => write!(f, "I/O error: {}", msg),
            DomainError::Serialization(msg) => write!(f, "Invalid JSON: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Serialization(e.to_string())
    }
}

/// Why an import was refused or could not complete.
///
/// `Display` yields the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The safety backup of the current store failed; nothing was imported
    SafetyBackup(DomainError),
    /// The import file could not be read or is not JSON
    Read(DomainError),
    /// Not an object, or an entry is not a progress record
    InvalidFormat(Option<String>),
    /// The imported map could not be written
    Save(DomainError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::SafetyBackup(_) => write!(f, "Failed to create safety backup before import."),
            ImportError::Read(e) => write!(f, "Error importing backup: {}", e),
            ImportError::InvalidFormat(None) => write!(f, "Invalid backup file format!"),
            ImportError::InvalidFormat(Some(detail)) => write!(f, "Invalid backup file format! {}", detail),
            ImportError::Save(_) => write!(f, "Error saving imported data."),
        }
    }
}

impl std::error::Error for ImportError {}
