//! Logo lookup by brand domain.
//!
//! Two keyed-by-domain providers share this client: the keyless Clearbit
//! endpoint and logo.dev, which needs a publishable token. A logo is only
//! returned after the provider has answered with an actual image.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reel_models::ImageCandidate;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::SourcesConfig;
use crate::entity::EntityDirectory;
use crate::error::{SourceError, SourceResult};
use crate::http::{build_client, ensure_success, send_error};
use crate::source::ImageSource;

/// Pixel size requested from logo providers.
const LOGO_SIZE: u32 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogoProvider {
    Clearbit,
    LogoDev,
}

/// Client for domain-keyed logo endpoints.
pub struct LogoClient {
    http: Client,
    provider: LogoProvider,
    base_url: String,
    token: Option<String>,
    directory: Arc<EntityDirectory>,
    timeout: Duration,
}

impl LogoClient {
    /// Clearbit logo endpoint (no credentials).
    pub fn clearbit(config: &SourcesConfig, directory: Arc<EntityDirectory>) -> SourceResult<Self> {
        Ok(Self {
            http: build_client(config.logo_timeout)?,
            provider: LogoProvider::Clearbit,
            base_url: config.clearbit_base_url.trim_end_matches('/').to_string(),
            token: None,
            directory,
            timeout: config.logo_timeout,
        })
    }

    /// logo.dev image endpoint.
    pub fn logo_dev(
        config: &SourcesConfig,
        token: String,
        directory: Arc<EntityDirectory>,
    ) -> SourceResult<Self> {
        if token.trim().is_empty() {
            return Err(SourceError::not_configured("LOGO_DEV_TOKEN is empty"));
        }
        Ok(Self {
            http: build_client(config.logo_timeout)?,
            provider: LogoProvider::LogoDev,
            base_url: config.logo_dev_base_url.trim_end_matches('/').to_string(),
            token: Some(token),
            directory,
            timeout: config.logo_timeout,
        })
    }

    /// URL of the logo for `domain`.
    pub fn logo_url(&self, domain: &str) -> SourceResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, domain))
            .map_err(|e| SourceError::invalid_response(format!("bad logo url for {}: {}", domain, e)))?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(token) = &self.token {
                query.append_pair("token", token);
            }
            query.append_pair("size", &LOGO_SIZE.to_string());
            if self.provider == LogoProvider::LogoDev {
                query.append_pair("format", "png");
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ImageSource for LogoClient {
    fn name(&self) -> &'static str {
        match self.provider {
            LogoProvider::Clearbit => "clearbit",
            LogoProvider::LogoDev => "logo_dev",
        }
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<ImageCandidate>> {
        let Some(domain) = self.directory.domain_for(query) else {
            return Ok(Vec::new());
        };
        let url = self.logo_url(&domain)?;
        debug!("Checking {} logo for '{}' at {}", self.name(), query, domain);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        // Unknown domains are a normal "no logo" answer
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let response = ensure_success(self.name(), response).await?;

        let is_image = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            debug!("{} answered without an image for {}", self.name(), domain);
            return Ok(Vec::new());
        }

        Ok(vec![ImageCandidate::new(
            url.to_string(),
            format!("{} logo", query.trim()),
            LOGO_SIZE,
            LOGO_SIZE,
        )])
    }
}
