use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// HTTP client bound to the listing service's base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url: String = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("property-upload/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.http_timeout)
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/properties`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Pull the optional `message` out of an error response body
pub async fn error_message(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
}

/// Fail with the server's message (or status) when the response is not 2xx
pub async fn ensure_success(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match error_message(response).await {
        Some(message) => anyhow::bail!("Failed to {}: {}", action, message),
        None => anyhow::bail!("Failed to {}: {}", action, status),
    }
}
