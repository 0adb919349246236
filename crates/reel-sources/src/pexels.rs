//! Pexels stock-photo search client.

use async_trait::async_trait;
use reel_models::ImageCandidate;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::SourcesConfig;
use crate::error::{SourceError, SourceResult};
use crate::http::{build_client, ensure_success, is_usable_image_url, send_error};
use crate::source::ImageSource;
use crate::types::{PexelsPhoto, PexelsSearchResponse};

/// Client for the Pexels photo search API.
pub struct PexelsClient {
    http: Client,
    api_key: String,
    base_url: String,
    per_page: u32,
    timeout: Duration,
}

impl PexelsClient {
    /// Create a new Pexels client.
    pub fn new(config: &SourcesConfig, api_key: String) -> SourceResult<Self> {
        if api_key.trim().is_empty() {
            return Err(SourceError::not_configured("PEXELS_API_KEY is empty"));
        }
        Ok(Self {
            http: build_client(config.stock_timeout)?,
            api_key,
            base_url: config.pexels_base_url.trim_end_matches('/').to_string(),
            per_page: config.pexels_per_page.clamp(1, 80),
            timeout: config.stock_timeout,
        })
    }

    fn to_candidate(photo: PexelsPhoto) -> ImageCandidate {
        let url = photo.src.large2x.unwrap_or(photo.src.original);
        ImageCandidate::new(url, photo.alt.unwrap_or_default(), photo.width, photo.height)
    }
}

#[async_trait]
impl ImageSource for PexelsClient {
    fn name(&self) -> &'static str {
        "pexels"
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<ImageCandidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/v1/search", self.base_url);
        let per_page = self.per_page.to_string();
        debug!("Searching Pexels for '{}'", query);

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.api_key.as_str())
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;
        let response = ensure_success(self.name(), response).await?;

        let body: PexelsSearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::invalid_response(format!("Pexels payload: {}", e)))?;

        let candidates: Vec<ImageCandidate> = body
            .photos
            .into_iter()
            .map(Self::to_candidate)
            .filter(|c| is_usable_image_url(&c.url))
            .collect();

        debug!("Pexels returned {} candidates for '{}'", candidates.len(), query);
        Ok(candidates)
    }
}
