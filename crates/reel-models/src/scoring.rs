//! Candidate scoring configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Weights and thresholds for ranking stock-photo candidates.
///
/// Relevance is a hard gate: a candidate whose text relevance falls below
/// `min_relevance` scores zero no matter how well it does on geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoringWeights {
    /// Weight of the keyword-match fraction
    pub text_relevance: f64,
    /// Bonus for portrait images (square gets half, landscape a quarter)
    pub orientation_bonus: f64,
    /// Bonus for images at or above `ideal_width`
    pub resolution_bonus: f64,
    /// Bonus for the first result, decaying with position
    pub position_bonus: f64,
    /// Penalty for generic stock boilerplate alt text
    pub generic_penalty: f64,
    /// Minimum relevance sub-score
    pub min_relevance: f64,
    /// Minimum total score to accept a candidate
    pub min_total_score: f64,
    /// Minimum total score for the first segment
    pub first_segment_min_score: f64,
    /// Width below which no resolution bonus is given
    pub min_width: u32,
    /// Width at which the full resolution bonus is given
    pub ideal_width: u32,
    /// Result position at which the position bonus reaches zero
    pub position_horizon: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            text_relevance: 0.50,
            orientation_bonus: 0.20,
            resolution_bonus: 0.15,
            position_bonus: 0.15,
            generic_penalty: 0.30,
            min_relevance: 0.10,
            min_total_score: 0.35,
            first_segment_min_score: 0.50,
            min_width: 640,
            ideal_width: 1080,
            position_horizon: 15,
        }
    }
}

impl ScoringWeights {
    /// Acceptance threshold for a segment.
    pub fn min_score_for(&self, first_segment: bool) -> f64 {
        if first_segment {
            self.first_segment_min_score
        } else {
            self.min_total_score
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("text_relevance", self.text_relevance),
            ("orientation_bonus", self.orientation_bonus),
            ("resolution_bonus", self.resolution_bonus),
            ("position_bonus", self.position_bonus),
            ("generic_penalty", self.generic_penalty),
            ("min_relevance", self.min_relevance),
            ("min_total_score", self.min_total_score),
            ("first_segment_min_score", self.first_segment_min_score),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, value));
            }
        }

        if self.first_segment_min_score < self.min_total_score {
            return Err(format!(
                "first_segment_min_score ({}) must not be below min_total_score ({})",
                self.first_segment_min_score, self.min_total_score
            ));
        }

        if self.min_width >= self.ideal_width {
            return Err(format!(
                "min_width ({}) must be below ideal_width ({})",
                self.min_width, self.ideal_width
            ));
        }

        if self.position_horizon == 0 {
            return Err("position_horizon must be at least 1".to_string());
        }

        Ok(())
    }
}
