//! Narration script and visual request models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four fixed sections of a narration script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NarrationSection {
    Hook,
    Body,
    Opinion,
    Cta,
}

impl NarrationSection {
    /// All sections in narration order.
    pub const ALL: [NarrationSection; 4] = [
        NarrationSection::Hook,
        NarrationSection::Body,
        NarrationSection::Opinion,
        NarrationSection::Cta,
    ];

    /// Fraction of the total narration time this section is assumed to occupy.
    pub fn time_share(&self) -> f64 {
        match self {
            NarrationSection::Hook => 0.15,
            NarrationSection::Body => 0.40,
            NarrationSection::Opinion => 0.30,
            NarrationSection::Cta => 0.15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NarrationSection::Hook => "hook",
            NarrationSection::Body => "body",
            NarrationSection::Opinion => "opinion",
            NarrationSection::Cta => "cta",
        }
    }
}

/// Generated narration, split into its four sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NarrationScript {
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub opinion: String,
    #[serde(default)]
    pub cta: String,
}

impl NarrationScript {
    /// Create a new narration script.
    pub fn new(
        hook: impl Into<String>,
        body: impl Into<String>,
        opinion: impl Into<String>,
        cta: impl Into<String>,
    ) -> Self {
        Self {
            hook: hook.into(),
            body: body.into(),
            opinion: opinion.into(),
            cta: cta.into(),
        }
    }

    /// Text of a single section.
    pub fn section(&self, section: NarrationSection) -> &str {
        match section {
            NarrationSection::Hook => &self.hook,
            NarrationSection::Body => &self.body,
            NarrationSection::Opinion => &self.opinion,
            NarrationSection::Cta => &self.cta,
        }
    }

    /// Sections paired with their text, in narration order.
    pub fn sections(&self) -> [(NarrationSection, &str); 4] {
        NarrationSection::ALL.map(|s| (s, self.section(s)))
    }

    /// The whole narration as spoken, non-empty sections joined by a space.
    pub fn full_text(&self) -> String {
        self.sections()
            .iter()
            .map(|(_, text)| text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True when every section is blank.
    pub fn is_empty(&self) -> bool {
        self.sections().iter().all(|(_, text)| text.trim().is_empty())
    }
}

/// Errors for malformed visual requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("total duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
}

/// Input to the visual selection pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VisualRequest {
    /// Narration to illustrate
    pub script: NarrationScript,

    /// Total narration duration in seconds
    pub total_duration: f64,

    /// Company or brand the story is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// News headline the narration was written from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
}

impl VisualRequest {
    /// Create a request without entity or headline.
    pub fn new(script: NarrationScript, total_duration: f64) -> Self {
        Self {
            script,
            total_duration,
            entity: None,
            headline: None,
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !self.total_duration.is_finite() || self.total_duration <= 0.0 {
            return Err(RequestError::InvalidDuration(self.total_duration));
        }
        Ok(())
    }

    /// Entity with surrounding whitespace removed, if any is left.
    pub fn entity(&self) -> Option<&str> {
        self.entity
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Headline with surrounding whitespace removed, if any is left.
    pub fn headline(&self) -> Option<&str> {
        self.headline
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}
