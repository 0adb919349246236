//! Provider request/response types.

use serde::{Deserialize, Serialize};

/// Pexels photo search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PexelsSearchResponse {
    #[serde(default)]
    pub photos: Vec<PexelsPhoto>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PexelsPhoto {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub alt: Option<String>,
    pub src: PexelsSrc,
}

/// Renditions served for a Pexels photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PexelsSrc {
    pub original: String,
    #[serde(default)]
    pub large2x: Option<String>,
    #[serde(default)]
    pub portrait: Option<String>,
}

/// Google Custom Search response (image search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CseResponse {
    #[serde(default)]
    pub items: Vec<CseItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CseItem {
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub image: Option<CseImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CseImage {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}
