//! Worker invocation
//!
//! Launches the external scraper as a child process and supervises it:
//! - Arguments are passed as a discrete vector, never through a shell
//! - stdout and stderr are drained concurrently, each capped in size
//! - The child is killed and reaped when the timeout expires

use async_trait::async_trait;
use jobscout_core::domain::{RunRequest, RunTarget, WorkerInvocation, WorkerOutput};
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

const CHUNK_SIZE: usize = 8 * 1024;

/// How the worker process is launched and supervised
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Program to execute (e.g. `python`)
    pub program: String,
    /// Arguments placed before the run flags (e.g. the wrapper script)
    pub leading_args: Vec<String>,
    /// Working directory of the child
    pub working_dir: PathBuf,
    /// Wall-clock limit for one invocation
    pub timeout: Duration,
    /// Maximum captured bytes per output stream
    pub output_limit: usize,
}

/// Worker failures
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to launch worker `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("worker exited with code {exit_code}")]
    Exited {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("worker timed out after {}s", .timeout.as_secs())]
    TimedOut {
        timeout: Duration,
        stdout: String,
        stderr: String,
    },

    #[error("failed to supervise worker: {0}")]
    Supervision(#[source] io::Error),
}

/// Runs the external worker for one request
#[async_trait]
pub trait WorkerInvoker: Send + Sync {
    /// Invokes the worker once and waits for it to finish
    ///
    /// A successful return only means the process exited with status 0; it
    /// says nothing about whether the artifact was written.
    async fn invoke(
        &self,
        request: &RunRequest,
        target: &RunTarget,
    ) -> Result<WorkerOutput, WorkerError>;
}

/// Worker backed by a real child process
pub struct ProcessWorker {
    config: WorkerConfig,
}

impl ProcessWorker {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    /// Builds the invocation for a run without executing it
    pub fn invocation(&self, request: &RunRequest, target: &RunTarget) -> WorkerInvocation {
        WorkerInvocation::new(
            &self.config.program,
            &self.config.leading_args,
            &self.config.working_dir,
            request,
            &target.output_path,
        )
    }
}

#[async_trait]
impl WorkerInvoker for ProcessWorker {
    async fn invoke(
        &self,
        request: &RunRequest,
        target: &RunTarget,
    ) -> Result<WorkerOutput, WorkerError> {
        let invocation = self.invocation(request, target);

        debug!(
            "Launching worker: {} {:?} (cwd: {})",
            invocation.command,
            invocation.args,
            invocation.working_dir.display()
        );

        let mut child = Command::new(&invocation.command)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| WorkerError::Launch {
                program: invocation.command.clone(),
                source,
            })?;

        let stdout_pipe = child
            .stdout
            .take()
            .ok_or_else(|| WorkerError::Supervision(io::Error::other("stdout was not piped")))?;
        let stderr_pipe = child
            .stderr
            .take()
            .ok_or_else(|| WorkerError::Supervision(io::Error::other("stderr was not piped")))?;

        let mut stdout = Capture::new(self.config.output_limit);
        let mut stderr = Capture::new(self.config.output_limit);

        let supervised = tokio::time::timeout(self.config.timeout, async {
            let (stdout_read, stderr_read, status) = tokio::join!(
                stdout.drain(stdout_pipe),
                stderr.drain(stderr_pipe),
                child.wait()
            );
            stdout_read.and(stderr_read).and(status)
        })
        .await;

        match supervised {
            Ok(Ok(status)) => {
                let stdout = stdout.into_string();
                let stderr = stderr.into_string();

                if !stdout.trim().is_empty() {
                    debug!("worker stdout: {}", stdout.trim());
                }
                if !stderr.trim().is_empty() {
                    debug!("worker stderr: {}", stderr.trim());
                }

                if status.success() {
                    info!("Worker finished for {}", target.output_id);
                    Ok(WorkerOutput { stdout, stderr })
                } else {
                    // No exit code means the child was terminated by a signal
                    let exit_code = status.code().unwrap_or(-1);
                    warn!(
                        "Worker for {} exited with code {}",
                        target.output_id, exit_code
                    );
                    Err(WorkerError::Exited {
                        exit_code,
                        stdout,
                        stderr,
                    })
                }
            }
            Ok(Err(err)) => {
                if let Err(kill_err) = child.kill().await {
                    warn!("Failed to kill worker after I/O error: {}", kill_err);
                }
                Err(WorkerError::Supervision(err))
            }
            Err(_) => {
                warn!(
                    "Worker for {} exceeded {:?}, killing it",
                    target.output_id, self.config.timeout
                );
                if let Err(kill_err) = child.kill().await {
                    warn!("Failed to kill timed out worker: {}", kill_err);
                }
                Err(WorkerError::TimedOut {
                    timeout: self.config.timeout,
                    stdout: stdout.into_string(),
                    stderr: stderr.into_string(),
                })
            }
        }
    }
}

/// Bounded accumulator for one output stream
///
/// Bytes past the limit are still read (so the child never blocks on a full
/// pipe) but only counted.
#[derive(Debug)]
struct Capture {
    bytes: Vec<u8>,
    limit: usize,
    dropped: usize,
}

impl Capture {
    fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
            dropped: 0,
        }
    }

    async fn drain<R: AsyncRead + Unpin>(&mut self, mut reader: R) -> io::Result<()> {
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let read = reader.read(&mut chunk).await?;
            if read == 0 {
                return Ok(());
            }

            let room = self.limit.saturating_sub(self.bytes.len());
            let kept = read.min(room);
            self.bytes.extend_from_slice(&chunk[..kept]);
            self.dropped += read - kept;
        }
    }

    fn into_string(self) -> String {
        let mut text = String::from_utf8_lossy(&self.bytes).into_owned();
        if self.dropped > 0 {
            text.push_str(&format!(
                "\n[output truncated: {} bytes dropped]",
                self.dropped
            ));
        }
        text
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use jobscout_core::domain::{Platform, TimeFilter};
    use std::path::Path;

    fn request() -> RunRequest {
        RunRequest {
            role: "HR Manager".to_string(),
            location: "Pune".to_string(),
            platforms: vec![Platform::LinkedIn],
            time_filter: TimeFilter::Last5Days,
        }
    }

    fn shell_worker(script: &str, timeout: Duration, output_limit: usize) -> ProcessWorker {
        ProcessWorker::new(WorkerConfig {
            program: "sh".to_string(),
            leading_args: vec!["-c".to_string(), script.to_string(), "worker".to_string()],
            working_dir: std::env::temp_dir(),
            timeout,
            output_limit,
        })
    }

    fn target() -> RunTarget {
        RunTarget::new(Path::new("/tmp"), "hr_manager", "1_0")
    }

    #[test]
    fn test_invocation_appends_run_flags() {
        let worker = shell_worker("true", Duration::from_secs(1), 1024);
        let invocation = worker.invocation(&request(), &target());
        assert_eq!(invocation.command, "sh");
        assert_eq!(invocation.args[0], "-c");
        assert_eq!(invocation.args[3], "--role");
        assert_eq!(invocation.args[4], "HR Manager");
        assert_eq!(invocation.args.last().unwrap(), "/tmp/hr_manager_1_0.xlsx");
    }

    #[tokio::test]
    async fn test_captures_both_streams_on_success() {
        let worker = shell_worker(
            "echo scraped; echo warning >&2",
            Duration::from_secs(10),
            1024,
        );
        let output = worker.invoke(&request(), &target()).await.unwrap();
        assert_eq!(output.stdout.trim(), "scraped");
        assert_eq!(output.stderr.trim(), "warning");
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_interpolated() {
        // $1 is --role, $2 its value; a shell string would have split it
        let worker = shell_worker("printf '%s' \"$2\"", Duration::from_secs(10), 1024);
        let mut request = request();
        request.role = "a; echo injected $(id)".to_string();
        let output = worker.invoke(&request, &target()).await.unwrap();
        assert_eq!(output.stdout, "a; echo injected $(id)");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported_with_output() {
        let worker = shell_worker(
            "echo partial; echo 'blocked by platform' >&2; exit 3",
            Duration::from_secs(10),
            1024,
        );
        match worker.invoke(&request(), &target()).await {
            Err(WorkerError::Exited {
                exit_code,
                stdout,
                stderr,
            }) => {
                assert_eq!(exit_code, 3);
                assert_eq!(stdout.trim(), "partial");
                assert_eq!(stderr.trim(), "blocked by platform");
            }
            other => panic!("expected Exited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_a_launch_failure() {
        let worker = ProcessWorker::new(WorkerConfig {
            program: "/nonexistent/jobscout-worker".to_string(),
            leading_args: vec![],
            working_dir: std::env::temp_dir(),
            timeout: Duration::from_secs(1),
            output_limit: 1024,
        });
        let err = worker.invoke(&request(), &target()).await.unwrap_err();
        assert!(matches!(err, WorkerError::Launch { .. }), "{:?}", err);
    }

    #[tokio::test]
    async fn test_timeout_kills_worker() {
        let worker = shell_worker(
            "echo started; sleep 30",
            Duration::from_millis(300),
            1024,
        );
        let started = std::time::Instant::now();
        let err = worker.invoke(&request(), &target()).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(10));
        match err {
            WorkerError::TimedOut { timeout, .. } => {
                assert_eq!(timeout, Duration::from_millis(300));
            }
            other => panic!("expected TimedOut, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_output_is_capped() {
        let worker = shell_worker(
            "i=0; while [ $i -lt 500 ]; do echo 0123456789; i=$((i+1)); done",
            Duration::from_secs(10),
            100,
        );
        let output = worker.invoke(&request(), &target()).await.unwrap();
        assert!(output.stdout.starts_with("0123456789\n"));
        assert!(output.stdout.contains("[output truncated: 5400 bytes dropped]"));
    }
}
