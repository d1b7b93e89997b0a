//! Health Check API Handler
//!
//! Liveness only; does not touch the worker or the output directory.

use axum::Json;
use jobscout_core::dto::HealthResponse;

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
