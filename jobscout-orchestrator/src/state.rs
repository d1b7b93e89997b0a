//! Shared application state

use std::sync::Arc;

use crate::api::auth::Authenticator;
use crate::service::{OutputDir, RunService};

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub runs: Arc<RunService>,
    pub output_dir: Arc<OutputDir>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(
        runs: Arc<RunService>,
        output_dir: Arc<OutputDir>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            runs,
            output_dir,
            authenticator,
        }
    }
}
