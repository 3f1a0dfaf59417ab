//! HTTP client for talking to the search engine

use crate::config::EngineSettings;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// Raw HTTP response from the engine
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl HttpResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper shared by every request
///
/// `reqwest::Client` keeps its own connection pool and is safe to clone and
/// use from many tasks at once; clones share that pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> reqwest::Result<Self> {
        Self::with_settings(&EngineSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &EngineSettings) -> reqwest::Result<Self> {
        let timeout = Duration::from_secs_f64(settings.request_timeout);
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(concat!("incident-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// POST a JSON body
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> reqwest::Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .timeout(self.default_timeout)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> reqwest::Result<HttpResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(HttpResponse { status, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_response_helpers() {
        let response = HttpResponse {
            status: 200,
            text: r#"{"took": 3}"#.to_string(),
        };
        assert!(response.is_success());

        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["took"], 3);
    }
}
