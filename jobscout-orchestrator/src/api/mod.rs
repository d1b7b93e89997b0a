//! API Module
//!
//! HTTP API layer for the orchestrator.
//! Each submodule handles endpoints for a specific concern.

pub mod auth;
pub mod download;
pub mod error;
pub mod health;
pub mod run;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Maximum accepted request body
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // Only the run endpoint spends worker time, so only it is guarded
    let guarded = Router::new()
        .route("/api/run-scraper", post(run::run_scraper))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/downloads/{file}", get(download::download_artifact))
        .merge(guarded)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
