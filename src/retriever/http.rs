//! reqwest-backed page fetcher

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{FetchError, PageFetcher};
use crate::model::FetchConfig;

/// Fetches pages with a fixed User-Agent and per-request timeout.
/// Redirects are followed; nothing is retried.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client })
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Connect(err.to_string())
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        if response.url() != url {
            tracing::debug!(url = %url, final_url = %response.url(), "Followed redirect");
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        tracing::debug!(url = %url, bytes = body.len(), "Fetched page");

        Ok(body)
    }
}
