//! Orchestrator configuration
//!
//! Every setting can be given as a flag or through the environment. The
//! worker settings control how the external scraper is launched and
//! supervised.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::api::auth::{AllowAll, Authenticator, BearerToken};
use crate::service::WorkerConfig;

/// Orchestrator configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "jobscout-orchestrator")]
#[command(about = "Jobscout run orchestration service", long_about = None)]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Directory that receives worker artifacts (created if missing)
    #[arg(long, env = "DOWNLOADS_DIR", default_value = "downloads")]
    pub downloads_dir: PathBuf,

    /// Worker program, usually an interpreter
    #[arg(long, env = "WORKER_BIN", default_value = "python")]
    pub worker_bin: String,

    /// Script passed to the worker program before the run flags; empty to
    /// run the worker program directly
    #[arg(long, env = "WORKER_SCRIPT", default_value = "scripts/run_scraper_wrapper.py")]
    pub worker_script: String,

    /// Working directory of the worker process
    #[arg(long, env = "WORKER_DIR", default_value = ".")]
    pub worker_dir: PathBuf,

    /// Maximum run time of one worker process, in seconds
    #[arg(long, env = "WORKER_TIMEOUT_SECS", default_value_t = 1200)]
    pub worker_timeout_secs: u64,

    /// Maximum captured bytes per worker output stream
    #[arg(long, env = "WORKER_OUTPUT_LIMIT", default_value_t = 8 * 1024 * 1024)]
    pub output_limit_bytes: usize,

    /// Bearer token required by the run endpoint; unset disables auth
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}

impl Config {
    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn worker_timeout(&self) -> Duration {
        Duration::from_secs(self.worker_timeout_secs)
    }

    /// Worker settings derived from this configuration
    pub fn worker_config(&self) -> WorkerConfig {
        let leading_args = match self.worker_script.trim() {
            "" => Vec::new(),
            script => vec![script.to_string()],
        };

        WorkerConfig {
            program: self.worker_bin.clone(),
            leading_args,
            working_dir: self.worker_dir.clone(),
            timeout: self.worker_timeout(),
            output_limit: self.output_limit_bytes,
        }
    }

    /// Authenticator guarding the run endpoint
    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        match self.api_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Arc::new(BearerToken::new(token)),
            _ => Arc::new(AllowAll),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.worker_bin.trim().is_empty() {
            anyhow::bail!("worker_bin cannot be empty");
        }

        if self.worker_timeout_secs == 0 {
            anyhow::bail!("worker_timeout_secs must be greater than 0");
        }

        if self.output_limit_bytes == 0 {
            anyhow::bail!("output_limit_bytes must be greater than 0");
        }

        Ok(())
    }
}
