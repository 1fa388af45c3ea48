use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// Single-shot HTTP GET. No retries, no custom timeout.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the body of a 2xx response as text.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(EtlError::from_request)?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatus { status });
        }

        let body = response.text().await.map_err(EtlError::from_request)?;
        tracing::debug!("Received {} bytes", body.len());
        Ok(body)
    }
}
