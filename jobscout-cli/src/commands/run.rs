//! Run command handler
//!
//! Posts a run, waits for the worker to finish and prints the jobs it found.
//! Failures print whatever the orchestrator captured from the worker.

use anyhow::Result;
use colored::*;
use jobscout_core::domain::JobRecord;
use jobscout_core::dto::{ErrorBody, RunScraperRequest, RunScraperResponse};
use std::path::PathBuf;

use super::download::save_artifact;
use crate::api::{ApiClient, ClientError};

const TITLE_WIDTH: usize = 40;
const COMPANY_WIDTH: usize = 24;
const LOCATION_WIDTH: usize = 20;

pub struct RunArgs {
    pub platforms: Vec<String>,
    pub role: String,
    pub location: String,
    pub time_filter: Option<String>,
    pub save: Option<PathBuf>,
}

pub async fn run_scraper(client: &ApiClient, args: RunArgs) -> Result<()> {
    let request = RunScraperRequest::new(
        args.role,
        args.location,
        args.platforms,
        args.time_filter,
    );

    println!("{}", "Running scraper, this can take a few minutes...".dimmed());

    match client.run_scraper(&request).await {
        Ok(response) => {
            print_run_summary(&response);
            if let Some(out) = args.save {
                save_artifact(client, &response.download_url, &out).await?;
            }
            Ok(())
        }
        Err(err @ ClientError::ApiError { .. }) => {
            let rejected = err.is_client_error();
            if let ClientError::ApiError { status, body } = err {
                print_failure(status, rejected, &body);
            }
            anyhow::bail!("Run did not complete")
        }
        Err(err) => Err(err.into()),
    }
}

fn print_run_summary(response: &RunScraperResponse) {
    println!("{} {}", "✓".green(), response.message.bold());
    println!("  Jobs:     {}", response.jobs.len().to_string().cyan());
    println!("  Download: {}", response.download_url.cyan());

    if response.jobs.is_empty() {
        println!("\n{}", "No jobs found.".yellow());
    } else {
        println!();
        print_job_table(&response.jobs);
    }
}

fn print_job_table(jobs: &[JobRecord]) {
    let header = format!(
        "  {:<10} {:<title$} {:<company$} {:<location$} {}",
        "PLATFORM",
        "TITLE",
        "COMPANY",
        "LOCATION",
        "POSTED",
        title = TITLE_WIDTH,
        company = COMPANY_WIDTH,
        location = LOCATION_WIDTH,
    );
    println!("{}", header.bold());

    for job in jobs {
        println!(
            "  {} {:<title$} {:<company$} {:<location$} {}",
            format!("{:<10}", job.platform).cyan(),
            truncate(&job.title, TITLE_WIDTH),
            truncate(&job.company, COMPANY_WIDTH),
            truncate(&job.location, LOCATION_WIDTH),
            job.posted_at.dimmed(),
            title = TITLE_WIDTH,
            company = COMPANY_WIDTH,
            location = LOCATION_WIDTH,
        );
        if !job.url.is_empty() {
            println!("  {:<10} {}", "", job.url.dimmed());
        }
    }
}

fn print_failure(status: u16, rejected: bool, body: &ErrorBody) {
    let heading = if rejected { "Request rejected" } else { "Run failed" };
    println!(
        "{} {} (HTTP {}): {}",
        "✗".red(),
        heading.red().bold(),
        status,
        body.message
    );

    if let Some(kind) = body.kind {
        println!("  Kind:  {}", kind.to_string().yellow());
    }
    if let Some(error) = &body.error {
        println!("  Error: {}", error.red());
    }
    print_stream("stderr", body.stderr.as_deref());
    print_stream("stdout", body.stdout.as_deref());
}

fn print_stream(name: &str, text: Option<&str>) {
    let Some(text) = text.map(str::trim_end).filter(|t| !t.is_empty()) else {
        return;
    };
    println!("\n{}", format!("Worker {}:", name).bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", text);
    println!("{}", "─".repeat(80).dimmed());
}

/// Cuts `text` to at most `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
