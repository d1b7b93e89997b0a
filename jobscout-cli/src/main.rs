//! Jobscout CLI
//!
//! Command-line interface for the Jobscout orchestrator.

mod api;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Run job scrapes through the Jobscout orchestrator", long_about = None)]
struct Cli {
    /// Orchestrator URL
    #[arg(long, env = "JOBSCOUT_URL", default_value = "http://localhost:4000")]
    server_url: String,

    /// Bearer token for the run endpoint
    #[arg(long, env = "JOBSCOUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
