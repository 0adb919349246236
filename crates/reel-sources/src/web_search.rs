//! Generic web image search via the Google Custom Search JSON API.

use async_trait::async_trait;
use reel_models::ImageCandidate;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::SourcesConfig;
use crate::error::{SourceError, SourceResult};
use crate::http::{build_client, ensure_success, is_usable_image_url, send_error};
use crate::source::ImageSource;
use crate::types::{CseItem, CseResponse};

/// Client for Google Custom Search restricted to images.
pub struct WebSearchClient {
    http: Client,
    api_key: String,
    engine_id: String,
    base_url: String,
    results: u32,
    timeout: Duration,
}

impl WebSearchClient {
    /// Create a new web search client.
    pub fn new(config: &SourcesConfig, api_key: String, engine_id: String) -> SourceResult<Self> {
        if api_key.trim().is_empty() || engine_id.trim().is_empty() {
            return Err(SourceError::not_configured("GOOGLE_CSE_KEY and GOOGLE_CSE_ID are required"));
        }
        Ok(Self {
            http: build_client(config.search_timeout)?,
            api_key,
            engine_id,
            base_url: config.google_cse_base_url.trim_end_matches('/').to_string(),
            // The API caps `num` at 10
            results: config.web_search_results.clamp(1, 10),
            timeout: config.search_timeout,
        })
    }

    fn to_candidate(item: CseItem) -> Option<ImageCandidate> {
        let is_svg = item
            .mime
            .as_deref()
            .map(|m| m.contains("svg"))
            .unwrap_or(false);
        if is_svg || !is_usable_image_url(&item.link) {
            return None;
        }
        let (width, height) = item.image.map(|i| (i.width, i.height)).unwrap_or((0, 0));
        Some(ImageCandidate::new(item.link, item.title, width, height))
    }
}

#[async_trait]
impl ImageSource for WebSearchClient {
    fn name(&self) -> &'static str {
        "google_cse"
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<ImageCandidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/customsearch/v1", self.base_url);
        let num = self.results.to_string();
        debug!("Searching web images for '{}'", query);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("searchType", "image"),
                ("safe", "active"),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;
        let response = ensure_success(self.name(), response).await?;

        let body: CseResponse = response
            .json()
            .await
            .map_err(|e| SourceError::invalid_response(format!("Custom Search payload: {}", e)))?;

        Ok(body.items.into_iter().filter_map(Self::to_candidate).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WebSearchClient {
        let config = SourcesConfig {
            google_cse_base_url: server.uri(),
            ..Default::default()
        };
        WebSearchClient::new(&config, "key".to_string(), "engine".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_search_filters_unusable_links() {
        let server = MockServer::start().await;
        let body = json!({
            "items": [
                { "link": "https://cdn.example.com/logo.svg", "title": "Vector logo" },
                { "link": "https://cdn.example.com/render", "title": "Rendered", "mime": "image/svg+xml" },
                { "link": "x-raw-image:///abc", "title": "Inline" },
                {
                    "link": "https://cdn.example.com/nvidia-logo.png",
                    "title": "Nvidia logo",
                    "mime": "image/png",
                    "image": { "width": 800, "height": 600 }
                }
            ]
        });

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", "Nvidia logo"))
            .and(query_param("searchType", "image"))
            .and(query_param("cx", "engine"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let candidates = client_for(&server).search("Nvidia logo").await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://cdn.example.com/nvidia-logo.png");
        assert_eq!(candidates[0].alt_text, "Nvidia logo");
        assert_eq!((candidates[0].width, candidates[0].height), (800, 600));
    }

    #[tokio::test]
    async fn test_no_items_is_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "kind": "customsearch#search" })))
            .mount(&server)
            .await;

        let candidates = client_for(&server).search("anything").await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_quota_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("dailyLimitExceeded"))
            .mount(&server)
            .await;

        let err = client_for(&server).search("robot").await.unwrap_err();
        assert!(matches!(err, SourceError::HttpStatus { status: 403, .. }));
    }
}
