//! Run Service
//!
//! Drives one run through
//! `Received -> Normalized -> Invoked -> Verified -> Parsed -> Completed`.
//! Each stage runs once; any failure ends the run with a typed [`RunError`].

use jobscout_core::domain::{FailureKind, JobRecord, RunStage, RunTarget};
use jobscout_core::dto::RunScraperRequest;
use jobscout_core::{InvalidRequest, normalize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::service::artifact::{ArtifactError, parse_workbook};
use crate::service::store::ArtifactStore;
use crate::service::worker::{WorkerError, WorkerInvoker};

/// Terminal failure of a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),

    #[error("failed to launch worker: {0}")]
    WorkerLaunchFailed(String),

    #[error("worker exited with code {exit_code}")]
    WorkerExecutionFailed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("worker timed out after {}s", .timeout.as_secs())]
    WorkerTimeout {
        timeout: Duration,
        stdout: String,
        stderr: String,
    },

    #[error("worker finished but output file was not generated")]
    ArtifactMissing { stdout: String, stderr: String },

    #[error("artifact could not be parsed: {0}")]
    ArtifactUnreadable(#[source] ArtifactError),
}

impl RunError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RunError::InvalidRequest(_) => FailureKind::InvalidRequest,
            RunError::WorkerLaunchFailed(_) => FailureKind::WorkerLaunchFailed,
            RunError::WorkerExecutionFailed { .. } => FailureKind::WorkerExecutionFailed,
            RunError::WorkerTimeout { .. } => FailureKind::WorkerTimeout,
            RunError::ArtifactMissing { .. } => FailureKind::ArtifactMissing,
            RunError::ArtifactUnreadable(_) => FailureKind::ArtifactUnreadable,
        }
    }
}

impl From<WorkerError> for RunError {
    fn from(err: WorkerError) -> Self {
        match err {
            WorkerError::Launch { .. } | WorkerError::Supervision(_) => {
                RunError::WorkerLaunchFailed(err.to_string())
            }
            WorkerError::Exited {
                exit_code,
                stdout,
                stderr,
            } => RunError::WorkerExecutionFailed {
                exit_code,
                stdout,
                stderr,
            },
            WorkerError::TimedOut {
                timeout,
                stdout,
                stderr,
            } => RunError::WorkerTimeout {
                timeout,
                stdout,
                stderr,
            },
        }
    }
}

/// A completed run
#[derive(Debug)]
pub struct RunOutcome {
    pub target: RunTarget,
    pub jobs: Vec<JobRecord>,
    pub stdout: String,
    pub stderr: String,
}

/// Composes normalization, worker invocation, verification and parsing
pub struct RunService {
    worker: Arc<dyn WorkerInvoker>,
    store: Arc<dyn ArtifactStore>,
}

impl RunService {
    pub fn new(worker: Arc<dyn WorkerInvoker>, store: Arc<dyn ArtifactStore>) -> Self {
        Self { worker, store }
    }

    /// Executes one run end to end
    pub async fn run(&self, raw: &RunScraperRequest) -> Result<RunOutcome, RunError> {
        let run_id = Uuid::new_v4();
        let result = self
            .execute(raw)
            .instrument(info_span!("run", %run_id))
            .await;

        match &result {
            Ok(outcome) => info!(
                "Run {} completed: {} job(s) in {}",
                run_id,
                outcome.jobs.len(),
                outcome.target.file_name()
            ),
            Err(err) if err.kind().is_client_error() => {
                debug!("Run {} rejected: {}", run_id, err)
            }
            Err(err) => warn!(
                "Run {} failed after {} ({}): {}",
                run_id,
                err.kind().failed_after(),
                err.kind(),
                err
            ),
        }

        result
    }

    async fn execute(&self, raw: &RunScraperRequest) -> Result<RunOutcome, RunError> {
        debug!(stage = %RunStage::Received, "Run received");

        let request = normalize(raw)?;
        let target = self.store.allocate(&request.slug());
        debug!(
            stage = %RunStage::Normalized,
            output_id = %target.output_id,
            platforms = %request.platforms_arg(),
            time_filter = %request.time_filter,
            "Request normalized"
        );

        let output = match self.worker.invoke(&request, &target).await {
            Ok(output) => output,
            Err(err) => {
                if matches!(err, WorkerError::TimedOut { .. }) {
                    self.store.discard(&target).await;
                }
                return Err(err.into());
            }
        };
        debug!(stage = %RunStage::Invoked, "Worker exited cleanly");

        if !self.store.exists(&target).await {
            return Err(RunError::ArtifactMissing {
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }
        debug!(stage = %RunStage::Verified, "Artifact present");

        let bytes = self
            .store
            .read(&target)
            .await
            .map_err(|err| RunError::ArtifactUnreadable(err.into()))?;
        let jobs = tokio::task::spawn_blocking(move || parse_workbook(bytes))
            .await
            .map_err(|err| RunError::ArtifactUnreadable(err.into()))?
            .map_err(RunError::ArtifactUnreadable)?;
        debug!(stage = %RunStage::Parsed, jobs = jobs.len(), "Artifact parsed");

        debug!(stage = %RunStage::Completed, "Run completed");
        Ok(RunOutcome {
            target,
            jobs,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
