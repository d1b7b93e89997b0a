use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobscout_orchestrator::api;
use jobscout_orchestrator::config::Config;
use jobscout_orchestrator::service::{OutputDir, ProcessWorker, RunService};
use jobscout_orchestrator::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobscout_orchestrator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Jobscout Orchestrator...");

    let config = Config::parse();
    config.validate()?;

    let output_dir = Arc::new(
        OutputDir::open(&config.downloads_dir).with_context(|| {
            format!(
                "Failed to open downloads directory {}",
                config.downloads_dir.display()
            )
        })?,
    );
    tracing::info!("Artifacts will be written to {}", output_dir.root().display());

    let worker_config = config.worker_config();
    tracing::info!(
        "Worker: {} {:?} (cwd: {}, timeout: {:?})",
        worker_config.program,
        worker_config.leading_args,
        worker_config.working_dir.display(),
        worker_config.timeout
    );

    let worker = Arc::new(ProcessWorker::new(worker_config));
    let runs = Arc::new(RunService::new(worker, output_dir.clone()));

    let authenticator = config.authenticator();
    tracing::info!("Run endpoint authentication: {}", authenticator.name());

    // Build router with all API endpoints
    let app = api::create_router(AppState::new(runs, output_dir, authenticator));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
