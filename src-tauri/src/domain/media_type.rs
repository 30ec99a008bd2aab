//! Media Type
//!
//! Classifies a tracked title. The type only changes how progress is
//! labelled and which emoji a status message carries.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::progress::ProgressChange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    /// Season / Episode
    #[default]
    TvShow,
    /// Issue / Page
    Comic,
    /// Volume / Page
    Book,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::TvShow => "tv-show",
            MediaType::Comic => "comic",
            MediaType::Book => "book",
        }
    }

    /// Unknown names fall back to tv-show
    pub fn from_str(s: &str) -> Self {
        match s {
            "comic" => MediaType::Comic,
            "book" => MediaType::Book,
            _ => MediaType::TvShow,
        }
    }

    /// Labels for the (major, minor) position fields
    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            MediaType::TvShow => ("Season", "Episode"),
            MediaType::Comic => ("Issue", "Page"),
            MediaType::Book => ("Volume", "Page"),
        }
    }

    pub fn glyph(&self, change: ProgressChange) -> &'static str {
        use ProgressChange::*;
        match (self, change) {
            (MediaType::TvShow, New) => "🆕",
            (MediaType::TvShow, Forward) => "⏩",
            (MediaType::TvShow, Backward) => "⏪",
            (MediaType::TvShow, Same) => "📺",
            (MediaType::Comic, New) => "💥",
            (MediaType::Comic, Forward) => "➡️",
            (MediaType::Comic, Backward) => "⬅️",
            (MediaType::Comic, Same) => "🗯️",
            (MediaType::Book, New) => "📚",
            (MediaType::Book, Forward) => "📖",
            (MediaType::Book, Backward) => "🔖",
            (MediaType::Book, Same) => "📕",
        }
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(MediaType::from_str(&name))
    }
}
