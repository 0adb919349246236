//! Narration timeline segmentation.
//!
//! Splits a narration into 2 or 3 visual segments, preferring cuts that land
//! on discourse markers, and derives the search query for each segment.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use reel_models::{NarrationScript, NarrationSection, QueryKind, SceneSegment};

use crate::analyzer::{KeywordExtractor, TransitionDetector};
use crate::catalog;
use crate::text::{contains_phrase, normalize_phrase, padded};
use crate::translator::QueryTranslator;

pub const MIN_SEGMENTS: usize = 2;
pub const MAX_SEGMENTS: usize = 3;

/// Default narration seconds per segment.
pub const DEFAULT_TARGET_SEGMENT_SECS: f64 = 20.0;

/// How segment boundaries were placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationStrategy {
    /// Cuts aligned with discourse markers
    TopicAware,
    /// Equal-length segments
    Uniform,
}

impl SegmentationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentationStrategy::TopicAware => "topic_aware",
            SegmentationStrategy::Uniform => "uniform",
        }
    }
}

/// Output of [`SceneSegmenter::segment`].
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub segments: Vec<SceneSegment>,
    pub strategy: SegmentationStrategy,
}

/// A literal visual concept and the phrases that evoke it.
#[derive(Debug, Clone)]
struct VisualConcept {
    triggers: Vec<String>,
    query: String,
}

/// Partitions a narration into scene segments.
#[derive(Debug)]
pub struct SceneSegmenter {
    extractor: KeywordExtractor,
    detector: TransitionDetector,
    translator: Arc<QueryTranslator>,
    concepts: Vec<VisualConcept>,
    target_segment_secs: f64,
}

impl SceneSegmenter {
    pub fn new(translator: Arc<QueryTranslator>) -> Self {
        Self {
            extractor: KeywordExtractor::default(),
            detector: TransitionDetector::default(),
            translator,
            concepts: catalog::VISUAL_CONCEPTS
                .iter()
                .map(|(triggers, query)| VisualConcept {
                    triggers: triggers.iter().map(|t| normalize_phrase(t)).collect(),
                    query: query.to_string(),
                })
                .collect(),
            target_segment_secs: DEFAULT_TARGET_SEGMENT_SECS,
        }
    }

    pub fn with_extractor(mut self, extractor: KeywordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_detector(mut self, detector: TransitionDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_target_segment_secs(mut self, secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            self.target_segment_secs = secs;
        }
        self
    }

    /// Number of segments for a narration of `total_duration` seconds.
    pub fn segment_count(&self, total_duration: f64) -> usize {
        let wanted = (total_duration / self.target_segment_secs).ceil();
        if wanted.is_finite() && wanted > 0.0 {
            (wanted as usize).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
        } else {
            MIN_SEGMENTS
        }
    }

    /// Split the narration and build each segment's query.
    ///
    /// `total_duration` is expected to be positive; durations shorter than one
    /// second per segment are stretched so every segment lasts at least 1 s.
    pub fn segment(
        &self,
        script: &NarrationScript,
        total_duration: f64,
        entity: Option<&str>,
        headline: Option<&str>,
    ) -> Segmentation {
        let count = self.segment_count(total_duration);
        let end = (total_duration.round() as u32).max(count as u32);

        let full_text = script.full_text();
        let (boundaries, strategy) = match self.topic_boundaries(&full_text, total_duration, count) {
            Some(cuts) => (vec![0, cuts[0], cuts[1], end], SegmentationStrategy::TopicAware),
            None => (uniform_boundaries(end, count), SegmentationStrategy::Uniform),
        };
        debug!(
            count,
            end,
            strategy = strategy.as_str(),
            boundaries = ?boundaries,
            "Placed segment boundaries"
        );

        let windows = section_windows(script, end);
        let anchor = self.grounding_anchor(entity, headline);

        let segments = boundaries
            .windows(2)
            .enumerate()
            .map(|(index, bounds)| {
                let (start, stop) = (bounds[0], bounds[1]);
                let text = segment_text(&windows, start, stop);
                let keywords = self.extractor.extract(&text, entity);
                let query = self.build_query(index, &text, &keywords, entity, anchor.as_deref());
                SceneSegment {
                    index,
                    start_second: start,
                    end_second: stop,
                    text,
                    keywords,
                    query,
                }
            })
            .collect();

        Segmentation { segments, strategy }
    }

    fn topic_boundaries(&self, full_text: &str, total_duration: f64, count: usize) -> Option<[u32; 2]> {
        if count != 3 {
            return None;
        }
        self.detector.locate_topic_boundaries(full_text, total_duration)
    }

    /// Term folded into keyword queries so images stay on the story.
    fn grounding_anchor(&self, entity: Option<&str>, headline: Option<&str>) -> Option<String> {
        if let Some(entity) = entity {
            return Some(entity.to_string());
        }
        let keywords = self.extractor.extract(headline?, None);
        self.translator.translate(&keywords).into_iter().next()
    }

    fn build_query(
        &self,
        index: usize,
        text: &str,
        keywords: &[String],
        entity: Option<&str>,
        anchor: Option<&str>,
    ) -> QueryKind {
        if index == 0 {
            if let Some(entity) = entity {
                return QueryKind::entity_logo(entity);
            }
        }

        let base = match self.match_concept(text) {
            Some(concept) => concept.to_string(),
            None => self.translator.build_queries(keywords, text, entity).primary,
        };

        let query = match anchor {
            Some(anchor) if !contains_phrase(&padded(&base), &normalize_phrase(anchor)) => {
                format!("{} {}", anchor, base).trim().to_string()
            }
            _ => base,
        };
        QueryKind::keywords(query)
    }

    /// First catalogued visual concept evoked by the text.
    fn match_concept(&self, text: &str) -> Option<&str> {
        let haystack = padded(text);
        self.concepts
            .iter()
            .find(|c| c.triggers.iter().any(|t| contains_phrase(&haystack, t)))
            .map(|c| c.query.as_str())
    }
}

/// Boundaries `0 = b0 < b1 < .. < b_count = end` splitting evenly.
pub fn uniform_boundaries(end: u32, count: usize) -> Vec<u32> {
    let count = count.max(1);
    (0..=count)
        .map(|i| (i as f64 * f64::from(end) / count as f64).round() as u32)
        .collect()
}

/// Narration sections mapped onto proportional time windows of `[0, end]`.
fn section_windows(script: &NarrationScript, end: u32) -> Vec<(f64, f64, &str)> {
    let end = f64::from(end);
    let mut cursor = 0.0;
    let mut windows = Vec::with_capacity(NarrationSection::ALL.len());
    for (section, text) in script.sections() {
        let span = section.time_share() * end;
        windows.push((cursor, cursor + span, text.trim()));
        cursor += span;
    }
    windows
}

fn segment_text(windows: &[(f64, f64, &str)], start: u32, stop: u32) -> String {
    let (start, stop) = (f64::from(start), f64::from(stop));
    windows
        .iter()
        .filter(|(from, to, text)| !text.is_empty() && start < *to && stop > *from)
        .map(|(_, _, text)| *text)
        .collect::<Vec<_>>()
        .join(" ")
}
