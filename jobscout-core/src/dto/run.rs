//! Run DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{FailureKind, JobRecord};

/// Raw body of `POST /api/run-scraper`
///
/// Fields are kept as untyped JSON so that normalization can tell a missing
/// platform list apart from one of the wrong shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunScraperRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_filter: Option<Value>,
}

impl RunScraperRequest {
    /// Typed constructor used by clients
    pub fn new(
        role: impl Into<String>,
        location: impl Into<String>,
        platforms: Vec<String>,
        time_filter: Option<String>,
    ) -> Self {
        Self {
            role: Some(Value::String(role.into())),
            location: Some(Value::String(location.into())),
            platforms: Some(Value::Array(
                platforms.into_iter().map(Value::String).collect(),
            )),
            time_filter: time_filter.map(Value::String),
        }
    }
}

/// Successful run response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunScraperResponse {
    pub message: String,
    pub jobs: Vec<JobRecord>,
    pub download_url: String,
    pub stdout: String,
}

/// Error response for every non-2xx status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}
