//! The image source abstraction shared by every provider.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reel_models::ImageCandidate;
use tracing::info;

use crate::config::SourcesConfig;
use crate::entity::EntityDirectory;
use crate::error::SourceResult;
use crate::logo::LogoClient;
use crate::pexels::PexelsClient;
use crate::web_search::WebSearchClient;

/// A searchable image provider.
///
/// An empty result means "nothing found" and is not an error. Errors are
/// reserved for transport and protocol failures.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Provider name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Search for images matching `query`.
    async fn search(&self, query: &str) -> SourceResult<Vec<ImageCandidate>>;
}

/// The providers available to the cascade, by role.
///
/// A role left as `None` is unconfigured and its cascade steps are skipped.
#[derive(Clone, Default)]
pub struct ImageProviders {
    pub logo_primary: Option<Arc<dyn ImageSource>>,
    pub logo_secondary: Option<Arc<dyn ImageSource>>,
    pub web_search: Option<Arc<dyn ImageSource>>,
    pub stock_photo: Option<Arc<dyn ImageSource>>,
}

impl ImageProviders {
    /// No providers at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build every provider the configuration has credentials for.
    pub fn from_config(config: &SourcesConfig) -> SourceResult<Self> {
        let directory = Arc::new(EntityDirectory::default());
        let mut providers = Self::empty();

        if config.clearbit_enabled {
            providers.logo_primary = Some(Arc::new(LogoClient::clearbit(config, directory.clone())?));
        }
        if let Some(token) = &config.logo_dev_token {
            providers.logo_secondary =
                Some(Arc::new(LogoClient::logo_dev(config, token.clone(), directory)?));
        }
        if let (Some(key), Some(cx)) = (&config.google_cse_key, &config.google_cse_id) {
            providers.web_search = Some(Arc::new(WebSearchClient::new(config, key.clone(), cx.clone())?));
        }
        if let Some(key) = &config.pexels_api_key {
            providers.stock_photo = Some(Arc::new(PexelsClient::new(config, key.clone())?));
        }

        info!("Image providers configured: {:?}", providers);
        Ok(providers)
    }

    pub fn with_logo_primary(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.logo_primary = Some(source);
        self
    }

    pub fn with_logo_secondary(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.logo_secondary = Some(source);
        self
    }

    pub fn with_web_search(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.web_search = Some(source);
        self
    }

    pub fn with_stock_photo(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.stock_photo = Some(source);
        self
    }

    /// Number of configured roles.
    pub fn configured_count(&self) -> usize {
        [
            &self.logo_primary,
            &self.logo_secondary,
            &self.web_search,
            &self.stock_photo,
        ]
        .iter()
        .filter(|p| p.is_some())
        .count()
    }
}

impl fmt::Debug for ImageProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |p: &Option<Arc<dyn ImageSource>>| p.as_ref().map(|s| s.name());
        f.debug_struct("ImageProviders")
            .field("logo_primary", &name(&self.logo_primary))
            .field("logo_secondary", &name(&self.logo_secondary))
            .field("web_search", &name(&self.web_search))
            .field("stock_photo", &name(&self.stock_photo))
            .finish()
    }
}
