//! Request normalization
//!
//! Turns the raw `POST /api/run-scraper` body into a validated [`RunRequest`].
//! Pure: no I/O, no clock, no process state.

use serde_json::Value;
use thiserror::Error;

use crate::domain::{Platform, RunRequest, TimeFilter, slugify};
use crate::dto::RunScraperRequest;

/// Reasons a request is rejected before any worker is started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("At least one platform is required.")]
    MissingPlatforms,

    #[error("Platform names must be strings, got {0}.")]
    NonStringPlatform(String),

    #[error("Unsupported platform: {0}. Expected one of LinkedIn, Indeed, Naukri, Foundit, Glassdoor.")]
    UnknownPlatform(String),

    #[error("Unsupported time filter: {0}. Expected one of Last 24 Hours, Last 3 Days, Last 5 Days.")]
    UnknownTimeFilter(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

/// Validates and canonicalizes a raw run request
pub fn normalize(raw: &RunScraperRequest) -> Result<RunRequest, InvalidRequest> {
    let platforms = normalize_platforms(raw.platforms.as_ref())?;

    let time_filter = match coerce_text(raw.time_filter.as_ref()).trim() {
        "" => TimeFilter::default(),
        text => TimeFilter::parse(text)
            .ok_or_else(|| InvalidRequest::UnknownTimeFilter(text.to_string()))?,
    };

    Ok(RunRequest {
        role: coerce_text(raw.role.as_ref()),
        location: coerce_text(raw.location.as_ref()),
        platforms,
        time_filter,
    })
}

impl RunRequest {
    /// Filesystem-safe slug of the role, see [`slugify`]
    pub fn slug(&self) -> String {
        slugify(&self.role)
    }
}

fn normalize_platforms(raw: Option<&Value>) -> Result<Vec<Platform>, InvalidRequest> {
    let Some(Value::Array(items)) = raw else {
        return Err(InvalidRequest::MissingPlatforms);
    };
    if items.is_empty() {
        return Err(InvalidRequest::MissingPlatforms);
    }

    let mut platforms = Vec::with_capacity(items.len());
    for item in items {
        let name = item
            .as_str()
            .ok_or_else(|| InvalidRequest::NonStringPlatform(item.to_string()))?;
        let platform =
            Platform::parse(name).ok_or_else(|| InvalidRequest::UnknownPlatform(name.to_string()))?;
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }

    Ok(platforms)
}

/// Coerces an optional JSON scalar to text; absent and null become empty
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
