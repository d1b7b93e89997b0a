//! Platform and time filter enumerations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Job platform the worker knows how to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    LinkedIn,
    Indeed,
    Naukri,
    Foundit,
    Glassdoor,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::LinkedIn,
        Platform::Indeed,
        Platform::Naukri,
        Platform::Foundit,
        Platform::Glassdoor,
    ];

    /// Canonical display name, also the spelling passed to the worker
    pub fn name(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Indeed => "Indeed",
            Platform::Naukri => "Naukri",
            Platform::Foundit => "Foundit",
            Platform::Glassdoor => "Glassdoor",
        }
    }

    /// Parses a platform name, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recency window for postings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFilter {
    #[serde(rename = "Last 24 Hours")]
    Last24Hours,
    #[serde(rename = "Last 3 Days")]
    Last3Days,
    #[default]
    #[serde(rename = "Last 5 Days")]
    Last5Days,
}

impl TimeFilter {
    pub const ALL: [TimeFilter; 3] = [
        TimeFilter::Last24Hours,
        TimeFilter::Last3Days,
        TimeFilter::Last5Days,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeFilter::Last24Hours => "Last 24 Hours",
            TimeFilter::Last3Days => "Last 3 Days",
            TimeFilter::Last5Days => "Last 5 Days",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
