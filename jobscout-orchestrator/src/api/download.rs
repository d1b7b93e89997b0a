//! Download API Handler
//!
//! Serves generated artifacts by their public file name.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::io;

use crate::api::error::{ApiError, ApiResult};
use crate::state::AppState;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /downloads/{file}
/// Stream an artifact as an attachment
pub async fn download_artifact(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> ApiResult<Response> {
    let path = state
        .output_dir
        .resolve_download(&file)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid download reference: {}", file)))?;

    let bytes = tokio::fs::read(&path).await.map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ApiError::NotFound(format!("Artifact {} not found", file)),
        _ => ApiError::InternalError(format!("Failed to read artifact {}: {}", file, err)),
    })?;

    tracing::debug!("Serving artifact {} ({} bytes)", file, bytes.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file),
            ),
        ],
        bytes,
    )
        .into_response())
}
