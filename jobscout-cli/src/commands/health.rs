//! Health command handler

use anyhow::{Context, Result};
use colored::*;

use crate::api::ApiClient;

pub async fn check_health(client: &ApiClient) -> Result<()> {
    let health = client
        .health()
        .await
        .with_context(|| format!("Orchestrator at {} is unreachable", client.base_url()))?;

    if health.ok {
        println!("{} {}", "✓".green(), client.base_url());
        Ok(())
    } else {
        anyhow::bail!("Orchestrator at {} reported not ok", client.base_url())
    }
}
