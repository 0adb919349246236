//! Scene segment models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a segment's image should be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryKind {
    /// Resolve the brand's logo by direct entity lookup
    EntityLogo { entity: String },
    /// Free-text image search
    Keywords { query: String },
}

impl QueryKind {
    pub fn keywords(query: impl Into<String>) -> Self {
        Self::Keywords {
            query: query.into(),
        }
    }

    pub fn entity_logo(entity: impl Into<String>) -> Self {
        Self::EntityLogo {
            entity: entity.into(),
        }
    }

    /// Human-readable form, recorded on the resolved image.
    pub fn as_text(&self) -> &str {
        match self {
            QueryKind::EntityLogo { entity } => entity,
            QueryKind::Keywords { query } => query,
        }
    }

    pub fn is_entity_logo(&self) -> bool {
        matches!(self, QueryKind::EntityLogo { .. })
    }
}

/// A contiguous slice of the narration timeline that gets exactly one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SceneSegment {
    /// 0-based position in the timeline
    pub index: usize,

    /// Start time, whole seconds
    pub start_second: u32,

    /// End time, whole seconds (exclusive)
    pub end_second: u32,

    /// Narration text spoken during this segment
    pub text: String,

    /// Salient keywords, most important first
    pub keywords: Vec<String>,

    /// Image lookup for this segment
    pub query: QueryKind,
}

impl SceneSegment {
    /// Duration in seconds.
    pub fn duration(&self) -> u32 {
        self.end_second.saturating_sub(self.start_second)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}
