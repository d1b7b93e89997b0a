//! Core domain types
//!
//! These types describe a single run from request to parsed records. They are
//! shared between the orchestrator (which executes runs) and the CLI (which
//! displays them).

pub mod platform;
pub mod record;
pub mod request;
pub mod run;
pub mod target;
pub mod worker;

pub use platform::{Platform, TimeFilter};
pub use record::JobRecord;
pub use request::RunRequest;
pub use run::{FailureKind, RunStage};
pub use target::{ARTIFACT_EXTENSION, DEFAULT_SLUG, RunTarget, is_artifact_file_name, slugify};
pub use worker::{WorkerInvocation, WorkerOutput};
