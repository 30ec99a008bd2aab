//! Progress Records
//!
//! Where the user is in each tracked title, plus the ordered title map that
//! is persisted as the progress file.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{DomainError, DomainResult};
use super::media_type::MediaType;

/// (major, minor) position, ordered lexicographically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Season / issue / volume
    pub major: i64,
    /// Episode / page
    pub minor: i64,
}

impl Position {
    pub fn new(major: i64, minor: i64) -> Self {
        Self { major, minor }
    }
}

/// Stored progress for one title.
///
/// Field names match the on-disk format. Records written before notes or
/// media types existed load with empty notes and `MediaType::TvShow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(rename = "Season")]
    pub major: i64,
    #[serde(rename = "Episode")]
    pub minor: i64,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    #[serde(rename = "MediaType", default)]
    pub media_type: MediaType,
}

impl ProgressRecord {
    pub fn new(major: i64, minor: i64, notes: String, media_type: MediaType) -> Self {
        Self {
            major,
            minor,
            notes,
            media_type,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.major, self.minor)
    }
}

/// Title -> record map that keeps insertion order.
///
/// Overwriting a title keeps its slot; removing a title closes the gap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap {
    entries: IndexMap<String, ProgressRecord>,
}

impl ProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&ProgressRecord> {
        self.entries.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Insert or overwrite, returning the previous record
    pub fn insert(&mut self, title: String, record: ProgressRecord) -> Option<ProgressRecord> {
        self.entries.insert(title, record)
    }

    pub fn remove(&mut self, title: &str) -> Option<ProgressRecord> {
        self.entries.shift_remove(title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Build a map from an untyped JSON object, checking every entry.
    ///
    /// The error names the first title whose record is malformed.
    pub fn from_object(object: Map<String, Value>) -> DomainResult<Self> {
        let (map, skipped) = Self::from_object_lossy(object);
        match skipped.into_iter().next() {
            Some((title, reason)) => Err(DomainError::InvalidInput(format!(
                "Entry '{}': {}",
                title, reason
            ))),
            None => Ok(map),
        }
    }

    /// Build a map from the entries that are valid records.
    ///
    /// Returns the skipped titles with the reason each one was rejected.
    pub fn from_object_lossy(object: Map<String, Value>) -> (Self, Vec<(String, String)>) {
        let mut map = ProgressMap::new();
        let mut skipped = Vec::new();
        for (title, value) in object {
            match serde_json::from_value::<ProgressRecord>(value) {
                Ok(record) => {
                    map.insert(title, record);
                }
                Err(e) => skipped.push((title, e.to_string())),
            }
        }
        (map, skipped)
    }
}

impl FromIterator<(String, ProgressRecord)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (String, ProgressRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Direction of a progress update relative to the previous record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressChange {
    New,
    Forward,
    Backward,
    Same,
}

impl ProgressChange {
    pub fn between(previous: Option<Position>, next: Position) -> Self {
        match previous {
            None => ProgressChange::New,
            Some(prev) => match next.cmp(&prev) {
                Ordering::Greater => ProgressChange::Forward,
                Ordering::Less => ProgressChange::Backward,
                Ordering::Equal => ProgressChange::Same,
            },
        }
    }
}

/// Outcome of writing a record for a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub title: String,
    pub record: ProgressRecord,
    pub change: ProgressChange,
}

impl ProgressUpdate {
    pub fn message(&self) -> String {
        let media = self.record.media_type;
        let (major_label, minor_label) = media.labels();
        format!(
            "{} Updated progress for '{}' - {} {}, {} {}",
            media.glyph(self.change),
            self.title,
            major_label,
            self.record.major,
            minor_label,
            self.record.minor,
        )
    }
}
