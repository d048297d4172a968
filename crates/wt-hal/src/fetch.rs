//! Fetch backends for resource loading.
//!
//! Centralizes status-code checks (non-success → [`HalError::Api`]) so the
//! proxy layer stays focused on document handling. Tests inject their own
//! [`FetchBackend`] implementations to count and script fetches.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HalError;

/// Transport used by resources to fetch their own documents.
#[async_trait]
pub trait FetchBackend: Send + Sync {
    /// Fetch the HAL document behind `href`.
    async fn fetch(&self, href: &str) -> Result<Value, HalError>;
}

/// HTTP fetch backend over [`reqwest`].
pub struct HttpFetch {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFetch {
    /// Create a backend resolving relative hrefs against `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn absolute(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{href}", self.base_url)
        }
    }
}

#[async_trait]
impl FetchBackend for HttpFetch {
    async fn fetch(&self, href: &str) -> Result<Value, HalError> {
        let url = self.absolute(href);
        tracing::debug!(%url, "fetching resource document");

        let resp = check_response(self.http.get(&url).send().await?).await?;
        resp.json::<Value>()
            .await
            .map_err(|err| HalError::Decode(err.to_string()))
    }
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success; a non-success status maps to
/// [`HalError::Api`] with the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, HalError> {
    if !resp.status().is_success() {
        return Err(HalError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
