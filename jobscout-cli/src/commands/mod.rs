//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod download;
mod health;
mod run;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the orchestrator is up
    Health,
    /// Run a scrape and print the jobs it found
    Run {
        /// Platform to scrape; repeat for several
        #[arg(short, long = "platform", required = true)]
        platforms: Vec<String>,

        /// Job role to search for
        #[arg(short, long, default_value = "")]
        role: String,

        /// Location to search in
        #[arg(short, long, default_value = "")]
        location: String,

        /// Recency window, e.g. "Last 24 Hours"
        #[arg(short, long)]
        time_filter: Option<String>,

        /// Also download the artifact to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Download a generated artifact
    Download {
        /// A downloadUrl from a run, or the artifact file name
        reference: String,

        /// Destination path; defaults to the artifact's file name
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        Commands::Health => health::check_health(&client).await,
        Commands::Run {
            platforms,
            role,
            location,
            time_filter,
            save,
        } => {
            run::run_scraper(
                &client,
                run::RunArgs {
                    platforms,
                    role,
                    location,
                    time_filter,
                    save,
                },
            )
            .await
        }
        Commands::Download { reference, out } => {
            download::download_artifact(&client, &reference, out).await
        }
    }
}
