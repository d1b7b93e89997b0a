//! API Error Handling
//!
//! Unified error type and conversion for API responses. Run failures keep the
//! worker's captured output in the body since it is usually the only clue to
//! what went wrong.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jobscout_core::dto::ErrorBody;

use crate::service::RunError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    PayloadTooLarge(String),
    InternalError(String),
    Run(RunError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorBody::message(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, ErrorBody::message(msg))
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::message(msg))
            }
            ApiError::Run(err) => {
                let status = if err.kind().is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, error_body(err))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RunError> for ApiError {
    fn from(err: RunError) -> Self {
        ApiError::Run(err)
    }
}

/// Builds the response body for a failed run
pub fn error_body(err: RunError) -> ErrorBody {
    let kind = Some(err.kind());

    match err {
        RunError::InvalidRequest(invalid) => ErrorBody {
            message: invalid.to_string(),
            kind,
            ..Default::default()
        },
        RunError::WorkerLaunchFailed(error) => ErrorBody {
            message: "Failed to run scraper.".to_string(),
            kind,
            error: Some(error),
            ..Default::default()
        },
        RunError::WorkerExecutionFailed {
            exit_code,
            stdout,
            stderr,
        } => {
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            let error = format!("Scraper exited with code {}. {}", exit_code, detail);
            ErrorBody {
                message: format!("Scraper exited with code {}.", exit_code),
                kind,
                error: Some(error.trim_end().to_string()),
                stderr: Some(stderr),
                stdout: Some(stdout),
            }
        }
        RunError::WorkerTimeout {
            timeout,
            stdout,
            stderr,
        } => ErrorBody {
            message: format!("Scraper timed out after {} seconds.", timeout.as_secs()),
            kind,
            stderr: Some(stderr),
            stdout: Some(stdout),
            ..Default::default()
        },
        RunError::ArtifactMissing { stdout, stderr } => ErrorBody {
            message: "Scraper finished but output file was not generated.".to_string(),
            kind,
            stderr: Some(stderr),
            stdout: Some(stdout),
            ..Default::default()
        },
        RunError::ArtifactUnreadable(source) => ErrorBody {
            message: "Scraper output could not be read.".to_string(),
            kind,
            error: Some(source.to_string()),
            ..Default::default()
        },
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
