//! Relevance scoring for image candidates.

use reel_models::{ImageCandidate, ScoringWeights};

use crate::catalog;
use crate::text::{contains_phrase, normalize_phrase, padded};

/// Keywords this short only match whole words ("ai" must not match "chair").
const SHORT_KEYWORD_CHARS: usize = 3;

/// The winning candidate of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub url: String,
    pub score: f64,
    /// Rank in the provider's result list
    pub position: usize,
}

/// Scores candidates by alt-text relevance and simple geometry.
#[derive(Debug, Clone)]
pub struct CandidateScorer {
    weights: ScoringWeights,
    generic_patterns: Vec<String>,
}

impl Default for CandidateScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl CandidateScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            generic_patterns: catalog::GENERIC_PATTERNS
                .iter()
                .map(|p| normalize_phrase(p))
                .collect(),
        }
    }

    pub fn with_generic_patterns(mut self, patterns: &[&str]) -> Self {
        self.generic_patterns = patterns.iter().map(|p| normalize_phrase(p)).collect();
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Weighted fraction of `keywords` found in the alt text.
    pub fn relevance(&self, candidate: &ImageCandidate, keywords: &[String]) -> f64 {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| normalize_phrase(k))
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return 0.0;
        }

        let alt = padded(&candidate.alt_text);
        let matched = keywords
            .iter()
            .filter(|k| {
                if k.chars().count() <= SHORT_KEYWORD_CHARS {
                    contains_phrase(&alt, k)
                } else {
                    alt.contains(k.as_str())
                }
            })
            .count();

        self.weights.text_relevance * matched as f64 / keywords.len() as f64
    }

    /// Score a candidate found at `position` in a result list.
    ///
    /// Candidates below the relevance gate score exactly 0 whatever their
    /// other qualities.
    pub fn score(&self, candidate: &ImageCandidate, keywords: &[String], position: usize) -> f64 {
        let relevance = self.relevance(candidate, keywords);
        if relevance < self.weights.min_relevance {
            return 0.0;
        }

        let w = &self.weights;
        let mut score = relevance
            + self.orientation_score(candidate)
            + self.resolution_score(candidate.width);

        if w.position_horizon > 0 {
            let decay = 1.0 - position as f64 / w.position_horizon as f64;
            score += w.position_bonus * decay.max(0.0);
        }

        if self.is_generic(&candidate.alt_text) {
            score -= w.generic_penalty;
        }

        score.max(0.0)
    }

    fn orientation_score(&self, candidate: &ImageCandidate) -> f64 {
        if candidate.width == 0 || candidate.height == 0 {
            0.0
        } else if candidate.is_portrait() {
            self.weights.orientation_bonus
        } else if candidate.is_square() {
            self.weights.orientation_bonus * 0.5
        } else {
            self.weights.orientation_bonus * 0.25
        }
    }

    fn resolution_score(&self, width: u32) -> f64 {
        let (min, ideal) = (self.weights.min_width, self.weights.ideal_width);
        if width < min {
            0.0
        } else if width >= ideal {
            self.weights.resolution_bonus
        } else {
            self.weights.resolution_bonus * f64::from(width - min) / f64::from(ideal - min)
        }
    }

    /// Whether the alt text reads like generic stock boilerplate.
    pub fn is_generic(&self, alt_text: &str) -> bool {
        let alt = padded(alt_text);
        self.generic_patterns.iter().any(|p| contains_phrase(&alt, p))
    }

    /// Highest-scoring candidate, if it clears the threshold for the segment.
    ///
    /// Ties go to the earlier candidate.
    pub fn select_best(
        &self,
        candidates: &[ImageCandidate],
        keywords: &[String],
        first_segment: bool,
    ) -> Option<ScoredCandidate> {
        let mut best: Option<ScoredCandidate> = None;
        for (position, candidate) in candidates.iter().enumerate() {
            let score = self.score(candidate, keywords, position);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(ScoredCandidate {
                    url: candidate.url.clone(),
                    score,
                    position,
                });
            }
        }

        let threshold = self.weights.min_score_for(first_segment);
        best.filter(|b| b.score > 0.0 && b.score >= threshold)
    }
}
