//! Image source clients for the visual selection pipeline.
//!
//! Every upstream provider is exposed through the [`ImageSource`] trait so
//! the cascade can treat logo lookups, stock-photo search and generic web
//! image search the same way. Providers that are not configured (missing
//! API keys) are simply absent from [`ImageProviders`].

pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod logo;
pub mod pexels;
pub mod source;
pub mod types;
pub mod web_search;

pub use config::SourcesConfig;
pub use entity::EntityDirectory;
pub use error::{SourceError, SourceResult};
pub use logo::LogoClient;
pub use pexels::PexelsClient;
pub use source::{ImageProviders, ImageSource};
pub use web_search::WebSearchClient;
