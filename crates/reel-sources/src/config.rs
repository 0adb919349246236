//! Image source configuration.

use std::time::Duration;

/// Credentials, endpoints and timeouts for every image provider.
///
/// A provider whose credentials are missing is left out of the cascade.
#[derive(Clone)]
pub struct SourcesConfig {
    /// Whether the keyless Clearbit logo endpoint is used
    pub clearbit_enabled: bool,
    pub clearbit_base_url: String,
    /// logo.dev publishable token
    pub logo_dev_token: Option<String>,
    pub logo_dev_base_url: String,
    /// Pexels API key
    pub pexels_api_key: Option<String>,
    pub pexels_base_url: String,
    /// Results requested per stock-photo search
    pub pexels_per_page: u32,
    /// Google Custom Search API key
    pub google_cse_key: Option<String>,
    /// Google Custom Search engine id (cx)
    pub google_cse_id: Option<String>,
    pub google_cse_base_url: String,
    /// Results requested per web image search
    pub web_search_results: u32,
    /// Timeout for logo lookups
    pub logo_timeout: Duration,
    /// Timeout for stock-photo searches
    pub stock_timeout: Duration,
    /// Timeout for web image searches
    pub search_timeout: Duration,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            clearbit_enabled: true,
            clearbit_base_url: "https://logo.clearbit.com".to_string(),
            logo_dev_token: None,
            logo_dev_base_url: "https://img.logo.dev".to_string(),
            pexels_api_key: None,
            pexels_base_url: "https://api.pexels.com".to_string(),
            pexels_per_page: 15,
            google_cse_key: None,
            google_cse_id: None,
            google_cse_base_url: "https://www.googleapis.com".to_string(),
            web_search_results: 5,
            logo_timeout: Duration::from_secs(5),
            stock_timeout: Duration::from_secs(8),
            search_timeout: Duration::from_secs(8),
        }
    }
}

impl SourcesConfig {
    /// A configuration with every provider disabled.
    pub fn unconfigured() -> Self {
        Self {
            clearbit_enabled: false,
            ..Default::default()
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            clearbit_enabled: std::env::var("CLEARBIT_LOGO_ENABLED")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(defaults.clearbit_enabled),
            clearbit_base_url: std::env::var("CLEARBIT_LOGO_URL")
                .unwrap_or(defaults.clearbit_base_url),
            logo_dev_token: non_empty_var("LOGO_DEV_TOKEN"),
            logo_dev_base_url: std::env::var("LOGO_DEV_URL").unwrap_or(defaults.logo_dev_base_url),
            pexels_api_key: non_empty_var("PEXELS_API_KEY"),
            pexels_base_url: std::env::var("PEXELS_URL").unwrap_or(defaults.pexels_base_url),
            pexels_per_page: std::env::var("PEXELS_PER_PAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.pexels_per_page),
            google_cse_key: non_empty_var("GOOGLE_CSE_KEY"),
            google_cse_id: non_empty_var("GOOGLE_CSE_ID"),
            google_cse_base_url: std::env::var("GOOGLE_CSE_URL")
                .unwrap_or(defaults.google_cse_base_url),
            web_search_results: std::env::var("WEB_SEARCH_RESULTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.web_search_results),
            logo_timeout: Duration::from_secs(
                std::env::var("LOGO_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            stock_timeout: Duration::from_secs(
                std::env::var("STOCK_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8),
            ),
            search_timeout: Duration::from_secs(
                std::env::var("WEB_SEARCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8),
            ),
        }
    }

    pub fn has_stock_photos(&self) -> bool {
        self.pexels_api_key.is_some()
    }

    pub fn has_web_search(&self) -> bool {
        self.google_cse_key.is_some() && self.google_cse_id.is_some()
    }
}

// Keys are redacted so the config can be logged at startup.
impl std::fmt::Debug for SourcesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcesConfig")
            .field("clearbit_enabled", &self.clearbit_enabled)
            .field("logo_dev", &self.logo_dev_token.is_some())
            .field("pexels", &self.pexels_api_key.is_some())
            .field("web_search", &self.has_web_search())
            .field("logo_timeout", &self.logo_timeout)
            .field("stock_timeout", &self.stock_timeout)
            .field("search_timeout", &self.search_timeout)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SourcesConfig::default();
        assert!(config.clearbit_enabled);
        assert!(!config.has_stock_photos());
        assert!(!config.has_web_search());
        assert_eq!(config.logo_timeout, Duration::from_secs(5));
        assert_eq!(config.pexels_per_page, 15);
    }

    #[test]
    fn test_unconfigured_disables_everything() {
        let config = SourcesConfig::unconfigured();
        assert!(!config.clearbit_enabled);
        assert!(config.logo_dev_token.is_none());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = SourcesConfig {
            pexels_api_key: Some("secret-key".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("pexels: true"));
    }
}
