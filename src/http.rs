//! HTTP client wrapper for NAS web API requests.

use std::time::Duration;

use reqwest::Client;
use tokio::time::timeout;

use crate::error::{NasError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client for making requests to the NAS.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a new HTTP client with a proxy.
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| NasError::Config(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| NasError::Config(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Make a GET request with query parameters.
    ///
    /// # Arguments
    /// * `url` - URL to request
    /// * `query` - Query string pairs, encoded by reqwest
    ///
    /// # Returns
    /// Response body as string
    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let request = async {
            let response = self.client.get(url).query(query).send().await?;

            if !response.status().is_success() {
                return Err(NasError::HttpError(response.status().as_u16()));
            }

            Ok(response.text().await?)
        };

        timeout(self.timeout, request)
            .await
            .map_err(|_| NasError::Timeout(self.timeout))?
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
        let _default = HttpClient::default();
    }

    #[test]
    fn test_timeout_override() {
        let client = HttpClient::new().with_timeout(Duration::from_secs(3));
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_proxy_creation() {
        let client = HttpClient::with_proxy("http://127.0.0.1:8080");
        assert!(client.is_ok());
    }

    #[test]
    fn test_proxy_invalid() {
        let res = HttpClient::with_proxy(":::::::");
        assert!(matches!(res, Err(NasError::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connectivity_error() {
        // Port 9 on localhost is discard; nothing should be listening there.
        let client = HttpClient::new().with_timeout(Duration::from_secs(2));
        let err = client
            .get("http://127.0.0.1:9/webapi/entry.cgi", &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Connectivity);
    }
}
