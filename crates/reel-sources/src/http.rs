//! Shared HTTP plumbing for the provider clients.

use std::time::Duration;

use reqwest::{Client, Response};
use url::Url;

use crate::error::{SourceError, SourceResult};

const USER_AGENT: &str = concat!("reel-visuals/", env!("CARGO_PKG_VERSION"));

/// Build a client with a provider-specific timeout.
pub fn build_client(timeout: Duration) -> SourceResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(SourceError::Network)
}

/// Map a send error, turning client timeouts into [`SourceError::Timeout`].
pub fn send_error(error: reqwest::Error, timeout: Duration) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout(timeout.as_secs())
    } else {
        SourceError::Network(error)
    }
}

/// Fail with [`SourceError::HttpStatus`] on a non-2xx response.
pub async fn ensure_success(provider: &'static str, response: Response) -> SourceResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let mut body = response.text().await.unwrap_or_default();
    if let Some((cut, _)) = body.char_indices().nth(200) {
        body.truncate(cut);
    }
    Err(SourceError::http_status(provider, status, body))
}

/// True for absolute http(s) URLs that do not point at an SVG.
pub fn is_usable_image_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some()
                && !url.path().to_lowercase().ends_with(".svg")
        }
        Err(_) => false,
    }
}
