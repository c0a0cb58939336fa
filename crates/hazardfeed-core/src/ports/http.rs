use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Status code and decoded body of a completed GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_modified(&self) -> bool {
        self.status == 304
    }
}

/// Port for issuing outbound GET requests
///
/// Implementations must enforce `timeout` and report connection failures,
/// DNS failures and timeouts as errors rather than hanging or panicking.
/// Non-2xx responses are returned as `Ok` so callers can inspect the status.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse> {
        (**self).get(url, timeout).await
    }
}
