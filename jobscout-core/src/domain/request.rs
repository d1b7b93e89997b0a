//! Run request domain type

use super::platform::{Platform, TimeFilter};

/// Validated caller intent for one run
///
/// Only constructed through [`crate::normalize`], which guarantees that
/// `platforms` is non-empty and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub role: String,
    pub location: String,
    pub platforms: Vec<Platform>,
    pub time_filter: TimeFilter,
}

impl RunRequest {
    /// Comma-joined platform list as passed to the worker
    pub fn platforms_arg(&self) -> String {
        self.platforms
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(",")
    }
}
