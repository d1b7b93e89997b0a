//! Run API Handler
//!
//! Single entry point that executes a scraper run and returns its records.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use jobscout_core::InvalidRequest;
use jobscout_core::dto::{RunScraperRequest, RunScraperResponse};

use crate::api::error::{ApiError, ApiResult};
use crate::service::RunError;
use crate::state::AppState;

/// POST /api/run-scraper
/// Run the worker for one search and return the parsed jobs
pub async fn run_scraper(
    State(state): State<AppState>,
    payload: Result<Json<RunScraperRequest>, JsonRejection>,
) -> ApiResult<Json<RunScraperResponse>> {
    let Json(raw) = payload.map_err(|rejection| {
        // Bodies over the router's limit fail while buffering
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            RunError::InvalidRequest(InvalidRequest::MalformedBody(rejection.body_text())).into()
        }
    })?;

    tracing::info!(
        "Run requested: role={:?} platforms={:?}",
        raw.role,
        raw.platforms
    );

    let outcome = state.runs.run(&raw).await?;

    Ok(Json(RunScraperResponse {
        message: "Scraper completed successfully.".to_string(),
        download_url: outcome.target.download_url(),
        jobs: outcome.jobs,
        stdout: outcome.stdout,
    }))
}
