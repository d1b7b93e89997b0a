//! Error types for the orchestrator client

use jobscout_core::dto::ErrorBody;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the orchestrator
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {}", .body.message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error body returned by the orchestrator
        body: ErrorBody,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Builds an API error from a raw response body
    ///
    /// Bodies that are not the orchestrator's JSON error shape (a proxy page,
    /// an empty body) are kept verbatim as the message.
    pub fn from_response(status: u16, text: &str) -> Self {
        let body = serde_json::from_str::<ErrorBody>(text).unwrap_or_else(|_| {
            let text = text.trim();
            ErrorBody::message(if text.is_empty() {
                format!("HTTP {}", status)
            } else {
                text.to_string()
            })
        });
        Self::ApiError { status, body }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if (400..500).contains(status))
    }
}
