//! Image candidate and resolved scene image models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An image offered by a source, before selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImageCandidate {
    pub url: String,

    /// Alt text or title supplied by the source
    #[serde(default)]
    pub alt_text: String,

    /// Width in pixels, 0 when unknown
    #[serde(default)]
    pub width: u32,

    /// Height in pixels, 0 when unknown
    #[serde(default)]
    pub height: u32,
}

impl ImageCandidate {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
            width,
            height,
        }
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn is_square(&self) -> bool {
        self.width > 0 && self.width == self.height
    }
}

/// Cascade step that produced a scene image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageSourceTag {
    LogoPrimary,
    LogoSecondary,
    LogoSearch,
    EntityStock,
    StockPhoto,
    WebSearch,
    AlternativeQuery,
    SimplifiedQuery,
    None,
}

impl ImageSourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSourceTag::LogoPrimary => "logo_primary",
            ImageSourceTag::LogoSecondary => "logo_secondary",
            ImageSourceTag::LogoSearch => "logo_search",
            ImageSourceTag::EntityStock => "entity_stock",
            ImageSourceTag::StockPhoto => "stock_photo",
            ImageSourceTag::WebSearch => "web_search",
            ImageSourceTag::AlternativeQuery => "alternative_query",
            ImageSourceTag::SimplifiedQuery => "simplified_query",
            ImageSourceTag::None => "none",
        }
    }
}

impl fmt::Display for ImageSourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The image chosen for one segment, consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SceneImage {
    pub scene_index: usize,
    pub start_second: u32,
    pub end_second: u32,

    /// Resolved image, `None` when no source produced a relevant one
    pub image_url: Option<String>,

    /// Query that succeeded (or the last one tried)
    pub query: String,

    pub source: ImageSourceTag,

    /// Whether the image was served from a local cache
    #[serde(default)]
    pub cached: bool,
}

impl SceneImage {
    /// A segment resolved to an image.
    pub fn resolved(
        scene_index: usize,
        start_second: u32,
        end_second: u32,
        image_url: impl Into<String>,
        query: impl Into<String>,
        source: ImageSourceTag,
    ) -> Self {
        Self {
            scene_index,
            start_second,
            end_second,
            image_url: Some(image_url.into()),
            query: query.into(),
            source,
            cached: false,
        }
    }

    /// A segment for which no source produced a usable image.
    pub fn none(scene_index: usize, start_second: u32, end_second: u32, query: impl Into<String>) -> Self {
        Self {
            scene_index,
            start_second,
            end_second,
            image_url: None,
            query: query.into(),
            source: ImageSourceTag::None,
            cached: false,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}
