//! Download command handler

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use crate::api::ApiClient;

/// Fetch an artifact and write it to disk
pub async fn download_artifact(
    client: &ApiClient,
    reference: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let out = out.unwrap_or_else(|| PathBuf::from(file_name_of(reference)));
    save_artifact(client, reference, &out).await
}

pub(crate) async fn save_artifact(client: &ApiClient, reference: &str, out: &Path) -> Result<()> {
    let bytes = client
        .download(reference)
        .await
        .with_context(|| format!("Failed to download {}", reference))?;

    tokio::fs::write(out, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;

    println!(
        "{} Saved {} ({} bytes)",
        "✓".green(),
        out.display().to_string().cyan(),
        bytes.len()
    );
    Ok(())
}

/// Last path segment of a download reference
fn file_name_of(reference: &str) -> &str {
    reference
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("jobs.xlsx")
}
