//! Keyword salience and discourse-transition analysis.
//!
//! Two pure text analyzers:
//! - [`KeywordExtractor`] ranks the salient terms of a span of narration.
//! - [`TransitionDetector`] finds discourse markers ("sin embargo",
//!   "in my opinion") and uses them to place segment cuts where the narration
//!   changes subject.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::{debug, warn};

use crate::catalog::{self, MarkerKind};
use crate::text::{normalize, normalize_phrase};

/// Default maximum number of keywords per segment.
pub const MAX_KEYWORDS: usize = 5;

/// Minimum length for a token that is not a technical term.
const MIN_TOKEN_CHARS: usize = 3;

/// Extracts ranked keywords from narration text.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stopwords: HashSet<String>,
    technical_terms: HashSet<String>,
    phrases: Vec<String>,
    max_keywords: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(
            catalog::STOPWORDS_ES.iter().chain(catalog::STOPWORDS_EN),
            catalog::TECHNICAL_TERMS.iter(),
        )
    }
}

impl KeywordExtractor {
    /// Build an extractor from stopword and technical-term tables.
    ///
    /// Technical terms containing a space are treated as phrases.
    pub fn new<'a, S, T>(stopwords: S, technical_terms: T) -> Self
    where
        S: IntoIterator<Item = &'a &'a str>,
        T: IntoIterator<Item = &'a &'a str>,
    {
        let mut single = HashSet::new();
        let mut phrases = Vec::new();
        for term in technical_terms {
            let term = normalize_phrase(term);
            if term.contains(' ') {
                phrases.push(term);
            } else if !term.is_empty() {
                single.insert(term);
            }
        }

        Self {
            stopwords: stopwords.into_iter().map(|w| normalize_phrase(w)).collect(),
            technical_terms: single,
            phrases,
            max_keywords: MAX_KEYWORDS,
        }
    }

    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords.max(1);
        self
    }

    pub fn max_keywords(&self) -> usize {
        self.max_keywords
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Extract up to `max_keywords` keywords, most salient first.
    ///
    /// Technical phrases come first (in order of appearance), then single
    /// technical terms, then the remaining tokens by frequency. A non-empty
    /// `context_entity` missing from the result is prepended.
    pub fn extract(&self, text: &str, context_entity: Option<&str>) -> Vec<String> {
        let normalized = normalize_phrase(text);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        let padded = format!(" {} ", normalized);

        let mut keywords: Vec<String> = Vec::new();

        let mut found: Vec<(usize, &String)> = self
            .phrases
            .iter()
            .filter_map(|p| padded.find(&format!(" {} ", p)).map(|pos| (pos, p)))
            .collect();
        // Earliest first; on a tie the longer phrase wins
        found.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));
        for (_, phrase) in found {
            push_unique(&mut keywords, phrase);
        }
        let phrase_words: HashSet<String> = keywords
            .iter()
            .flat_map(|p| p.split(' '))
            .map(str::to_string)
            .collect();

        for &token in &tokens {
            if self.technical_terms.contains(token) && !phrase_words.contains(token) {
                push_unique(&mut keywords, token);
            }
        }

        // token -> (count, first index)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (i, &token) in tokens.iter().enumerate() {
            if !self.is_candidate_token(token) || phrase_words.contains(token) {
                continue;
            }
            counts.entry(token).or_insert((0, i)).0 += 1;
        }
        let mut ranked: Vec<(&str, usize, usize)> =
            counts.into_iter().map(|(t, (n, first))| (t, n, first)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        for (token, _, _) in ranked {
            if keywords.len() >= self.max_keywords {
                break;
            }
            push_unique(&mut keywords, token);
        }
        keywords.truncate(self.max_keywords);

        if let Some(entity) = context_entity.map(normalize_phrase) {
            if !entity.is_empty() && !keywords.contains(&entity) {
                keywords.insert(0, entity);
                keywords.truncate(self.max_keywords);
            }
        }

        keywords
    }

    fn is_candidate_token(&self, token: &str) -> bool {
        if self.technical_terms.contains(token) || self.stopwords.contains(token) {
            return false;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        token.chars().count() >= MIN_TOKEN_CHARS
    }
}

fn push_unique(keywords: &mut Vec<String>, term: &str) {
    if !keywords.iter().any(|k| k == term) {
        keywords.push(term.to_string());
    }
}

/// A discourse marker and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMarker {
    /// Normalized phrase
    pub phrase: String,
    /// Strength of the topic change it signals, in (0, 1]
    pub weight: f64,
    pub kind: MarkerKind,
}

/// A marker occurrence in the narration.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatch {
    /// Char offset into the narration
    pub char_index: usize,
    pub weight: f64,
    pub phrase: String,
}

/// Tuning for topic-aware cut placement.
#[derive(Debug, Clone)]
pub struct BoundaryConfig {
    /// Search radius around each target, as a fraction of the duration
    pub tolerance_fraction: f64,
    /// Minimum `weight * proximity` for a marker to be used
    pub min_marker_score: f64,
    /// Minimum length of every resulting segment
    pub min_segment_seconds: u32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            tolerance_fraction: 0.15,
            min_marker_score: 0.30,
            min_segment_seconds: 6,
        }
    }
}

/// Finds discourse markers and derives topic-aligned cut points.
#[derive(Debug, Clone)]
pub struct TransitionDetector {
    markers: Vec<(TransitionMarker, Regex)>,
    config: BoundaryConfig,
}

impl Default for TransitionDetector {
    fn default() -> Self {
        let markers = catalog::TRANSITION_MARKERS
            .iter()
            .map(|(phrase, weight, kind)| TransitionMarker {
                phrase: phrase.to_string(),
                weight: *weight,
                kind: *kind,
            })
            .collect();
        Self::new(markers, BoundaryConfig::default())
    }
}

impl TransitionDetector {
    /// Build a detector from a marker catalogue.
    ///
    /// Markers with a weight outside (0, 1] or an empty phrase are dropped.
    pub fn new(markers: Vec<TransitionMarker>, config: BoundaryConfig) -> Self {
        let markers = markers
            .into_iter()
            .filter_map(|mut marker| {
                marker.phrase = normalize_phrase(&marker.phrase);
                if marker.phrase.is_empty() || !(marker.weight > 0.0 && marker.weight <= 1.0) {
                    warn!("Ignoring transition marker {:?}", marker);
                    return None;
                }
                let pattern = format!(r"\b{}\b", regex::escape(&marker.phrase).replace(' ', r"\s+"));
                match Regex::new(&pattern) {
                    Ok(regex) => Some((marker, regex)),
                    Err(e) => {
                        warn!("Invalid transition marker '{}': {}", marker.phrase, e);
                        None
                    }
                }
            })
            .collect();

        Self { markers, config }
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// Every marker occurrence in `full_text`, sorted by position.
    pub fn find_markers(&self, full_text: &str) -> Vec<TransitionMatch> {
        let normalized = normalize(full_text);
        let mut matches: Vec<TransitionMatch> = Vec::new();

        for (marker, regex) in &self.markers {
            for found in regex.find_iter(&normalized) {
                matches.push(TransitionMatch {
                    char_index: normalized[..found.start()].chars().count(),
                    weight: marker.weight,
                    phrase: marker.phrase.clone(),
                });
            }
        }

        matches.sort_by(|a, b| {
            a.char_index
                .cmp(&b.char_index)
                .then(b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal))
        });
        matches
    }

    /// Two cut points (whole seconds) aligned with topic changes, for a
    /// three-segment split.
    ///
    /// Marker offsets are converted to time assuming a uniform reading speed
    /// over the whole narration. Returns `None` when either third has no
    /// qualifying marker nearby or the duration cannot hold three segments of
    /// the minimum length; callers fall back to uniform division.
    pub fn locate_topic_boundaries(&self, full_text: &str, total_duration: f64) -> Option<[u32; 2]> {
        if !total_duration.is_finite() || total_duration <= 0.0 {
            return None;
        }
        let text_len = full_text.chars().count();
        if text_len == 0 {
            return None;
        }

        let markers = self.find_markers(full_text);
        if markers.is_empty() {
            debug!("No transition markers found");
            return None;
        }

        let tolerance = self.config.tolerance_fraction * total_duration;
        let mut cuts = [0.0f64; 2];
        for (slot, fraction) in [1.0 / 3.0, 2.0 / 3.0].into_iter().enumerate() {
            let target = fraction * total_duration;
            let best = markers
                .iter()
                .filter_map(|m| {
                    let time = m.char_index as f64 / text_len as f64 * total_duration;
                    let distance = (time - target).abs();
                    if distance > tolerance {
                        return None;
                    }
                    Some((m.weight * (1.0 - distance / tolerance), time, m))
                })
                .max_by(|a, b| a.0.total_cmp(&b.0))?;

            if best.0 < self.config.min_marker_score {
                debug!(
                    "Best marker '{}' near {:.1}s scored {:.2}, below threshold",
                    best.2.phrase, target, best.0
                );
                return None;
            }
            debug!(
                "Cut {} at {:.1}s on '{}' (score {:.2})",
                slot + 1,
                best.1,
                best.2.phrase,
                best.0
            );
            cuts[slot] = best.1;
        }

        let end = total_duration.round() as u32;
        let floor = self.config.min_segment_seconds;
        if end < floor.saturating_mul(3) {
            return None;
        }

        let first = (cuts[0].round() as u32).clamp(floor, end - 2 * floor);
        let second = (cuts[1].round() as u32).clamp(first + floor, end - floor);
        Some([first, second])
    }
}
