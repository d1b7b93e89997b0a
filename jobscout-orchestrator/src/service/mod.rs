//! Service Module
//!
//! Business logic for runs. The worker and the artifact store sit behind
//! traits so the run service can be exercised without real processes or a
//! real filesystem.

pub mod artifact;
pub mod run;
pub mod store;
pub mod worker;

pub use artifact::{ArtifactError, parse_workbook};
pub use run::{RunError, RunOutcome, RunService};
pub use store::{ArtifactStore, OutputDir};
pub use worker::{ProcessWorker, WorkerConfig, WorkerError, WorkerInvoker};
