//! Jobscout Orchestrator
//!
//! HTTP service that turns a job-search request into one supervised worker
//! run and returns the parsed results.
//!
//! Architecture:
//! - Config: command-line / environment settings
//! - Service: worker invocation, artifact storage and parsing, run orchestration
//! - API: axum router, handlers and error mapping

pub mod api;
pub mod config;
pub mod service;
pub mod state;
