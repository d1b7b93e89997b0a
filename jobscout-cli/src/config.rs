//! Configuration module
//!
//! Handles CLI configuration such as the orchestrator URL.

use crate::api::ApiClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the orchestrator service
    pub server_url: String,
    /// Token sent as `Authorization: Bearer` on run requests
    pub token: Option<String>,
}

impl Config {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.server_url, self.token.clone())
    }
}
