//! API client module
//!
//! HTTP client for communicating with the Jobscout orchestrator API.

mod error;

pub use error::{ClientError, Result};

use jobscout_core::dto::{HealthResponse, RunScraperRequest, RunScraperResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Jobscout orchestrator API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the orchestrator API
    /// * `token` - Optional bearer token for the run endpoint
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check orchestrator liveness
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Run one scrape and wait for its result
    ///
    /// A run holds the connection open until the worker finishes, which can
    /// take minutes, so no request timeout is applied here.
    pub async fn run_scraper(&self, req: &RunScraperRequest) -> Result<RunScraperResponse> {
        let url = format!("{}/api/run-scraper", self.base_url);
        let mut request = self.client.post(&url).json(req);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Fetch an artifact's bytes
    ///
    /// # Arguments
    /// * `reference` - A `downloadUrl` from a run, a full URL, or a bare file name
    pub async fn download(&self, reference: &str) -> Result<Vec<u8>> {
        let url = self.download_url(reference);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status.as_u16(), &text));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Resolves a download reference against the base URL
    pub fn download_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else if reference.starts_with('/') {
            format!("{}{}", self.base_url, reference)
        } else {
            format!("{}/downloads/{}", self.base_url, reference)
        }
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status.as_u16(), &text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:4000/", None);
        assert_eq!(client.base_url(), "http://localhost:4000");
    }

    #[test]
    fn test_download_url_resolution() {
        let client = ApiClient::new("http://localhost:4000", None);
        assert_eq!(
            client.download_url("/downloads/hr_1_0.xlsx"),
            "http://localhost:4000/downloads/hr_1_0.xlsx"
        );
        assert_eq!(
            client.download_url("hr_1_0.xlsx"),
            "http://localhost:4000/downloads/hr_1_0.xlsx"
        );
        assert_eq!(
            client.download_url("https://jobs.example.com/downloads/hr_1_0.xlsx"),
            "https://jobs.example.com/downloads/hr_1_0.xlsx"
        );
    }
}
