//! External worker invocation types

use std::path::{Path, PathBuf};

use super::request::RunRequest;

/// A fully-resolved worker process call
///
/// Arguments are kept as a discrete vector and handed to the OS as-is; they
/// are never joined into a shell command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerInvocation {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl WorkerInvocation {
    /// Builds the invocation for one run
    ///
    /// `leading_args` come before the run flags (typically the worker script
    /// path when `command` is an interpreter).
    pub fn new(
        command: &str,
        leading_args: &[String],
        working_dir: &Path,
        request: &RunRequest,
        output_path: &Path,
    ) -> Self {
        let mut args = leading_args.to_vec();
        args.extend([
            "--role".to_string(),
            request.role.clone(),
            "--location".to_string(),
            request.location.clone(),
            "--platforms".to_string(),
            request.platforms_arg(),
            "--time-filter".to_string(),
            request.time_filter.label().to_string(),
            "--output-file".to_string(),
            output_path.to_string_lossy().into_owned(),
        ]);

        Self {
            command: command.to_string(),
            args,
            working_dir: working_dir.to_path_buf(),
        }
    }
}

/// Captured output of a worker that exited with status 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerOutput {
    pub stdout: String,
    pub stderr: String,
}
