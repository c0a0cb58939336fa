use async_trait::async_trait;
use hazardfeed_core::ports::{HttpClient, HttpResponse};
use hazardfeed_core::{FeedError, Result};
use std::time::Duration;

/// [`HttpClient`] backed by a shared `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| map_reqwest_error(url, e))?;

        tracing::debug!(url, status, bytes = body.len(), "GET completed");
        Ok(HttpResponse::new(status, body))
    }
}

fn map_reqwest_error(url: &str, e: reqwest::Error) -> FeedError {
    if e.is_timeout() {
        FeedError::Timeout { url: url.to_string() }
    } else {
        FeedError::Transport { url: url.to_string(), reason: e.to_string() }
    }
}
