//! Search query models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Language of a generated search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryLanguage {
    /// Keywords passed through untranslated
    #[default]
    Source,
    /// At least one keyword was translated to English
    English,
}

/// Search queries derived for one segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SmartQueryResult {
    /// Main query, empty when no keywords were available
    pub primary: String,

    /// Fallback queries, at most two
    pub alternatives: Vec<String>,

    pub language: QueryLanguage,

    /// Keywords as extracted from the narration
    pub original_keywords: Vec<String>,

    /// Keywords after dictionary translation
    pub translated_keywords: Vec<String>,
}

impl SmartQueryResult {
    /// Maximum number of alternative queries.
    pub const MAX_ALTERNATIVES: usize = 2;

    pub fn has_primary(&self) -> bool {
        !self.primary.trim().is_empty()
    }
}
