//! Run lifecycle types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a run
///
/// Runs move strictly forward through
/// `Received -> Normalized -> Invoked -> Verified -> Parsed -> Completed`
/// and may stop at any stage with a [`FailureKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RunStage {
    Received,
    Normalized,
    Invoked,
    Verified,
    Parsed,
    Completed,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Why a run terminated without completing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    InvalidRequest,
    WorkerLaunchFailed,
    WorkerExecutionFailed,
    WorkerTimeout,
    ArtifactMissing,
    ArtifactUnreadable,
}

impl FailureKind {
    /// The last stage the run reached before failing
    pub fn failed_after(self) -> RunStage {
        match self {
            FailureKind::InvalidRequest => RunStage::Received,
            FailureKind::WorkerLaunchFailed
            | FailureKind::WorkerExecutionFailed
            | FailureKind::WorkerTimeout => RunStage::Normalized,
            FailureKind::ArtifactMissing => RunStage::Invoked,
            FailureKind::ArtifactUnreadable => RunStage::Verified,
        }
    }

    /// Whether the caller is at fault rather than the worker or the host
    pub fn is_client_error(self) -> bool {
        matches!(self, FailureKind::InvalidRequest)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
