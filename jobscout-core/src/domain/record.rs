//! Job record domain type

use serde::{Deserialize, Serialize};

/// One parsed artifact row
///
/// Every field is a plain string; a cell missing from the artifact is stored
/// as an empty string, never as an absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    pub platform: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub source: String,
    #[serde(alias = "postedAt")]
    pub posted_at: String,
    pub url: String,
}

/// Column of a [`JobRecord`], resolved from an artifact header cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Platform,
    Title,
    Company,
    Location,
    Source,
    PostedAt,
    Url,
}

impl RecordField {
    /// Maps a header cell to a field
    ///
    /// Case and non-alphanumeric characters are ignored, so `posted_at`,
    /// `postedAt` and `Date Posted` all resolve to [`RecordField::PostedAt`].
    pub fn from_header(header: &str) -> Option<Self> {
        let key: String = header
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "platform" => Some(RecordField::Platform),
            "title" => Some(RecordField::Title),
            "company" => Some(RecordField::Company),
            "location" => Some(RecordField::Location),
            "source" => Some(RecordField::Source),
            "postedat" | "dateposted" => Some(RecordField::PostedAt),
            "url" => Some(RecordField::Url),
            _ => None,
        }
    }
}

impl JobRecord {
    /// Stores `value` unless the field already holds text
    ///
    /// When several columns map to the same field, the first non-empty cell
    /// wins.
    pub fn fill(&mut self, field: RecordField, value: String) {
        let slot = match field {
            RecordField::Platform => &mut self.platform,
            RecordField::Title => &mut self.title,
            RecordField::Company => &mut self.company,
            RecordField::Location => &mut self.location,
            RecordField::Source => &mut self.source,
            RecordField::PostedAt => &mut self.posted_at,
            RecordField::Url => &mut self.url,
        };
        if slot.is_empty() {
            *slot = value;
        }
    }
}
