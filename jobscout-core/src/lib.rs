//! Jobscout Core
//!
//! Core types and pure logic for the Jobscout run service.
//!
//! This crate contains:
//! - Domain types: run requests, run targets, job records, worker invocations
//! - Normalization: turning a raw request body into a validated `RunRequest`
//! - DTOs: wire types shared by the orchestrator and the CLI

pub mod domain;
pub mod dto;
pub mod normalize;

pub use normalize::{InvalidRequest, normalize};
