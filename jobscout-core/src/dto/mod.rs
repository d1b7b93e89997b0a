//! Data Transfer Objects
//!
//! Wire types of the HTTP surface, shared by the orchestrator (which produces
//! them) and the CLI (which consumes them).

pub mod health;
pub mod run;

pub use health::HealthResponse;
pub use run::{ErrorBody, RunScraperRequest, RunScraperResponse};
