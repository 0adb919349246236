//! Pipeline configuration.

use std::time::Duration;

use reel_models::ScoringWeights;

use crate::cascade::DEFAULT_SEGMENT_DELAY;
use crate::error::{VisualsError, VisualsResult};
use crate::segmenter::DEFAULT_TARGET_SEGMENT_SECS;

/// Visual pipeline configuration.
#[derive(Debug, Clone)]
pub struct VisualsConfig {
    /// Pause before each segment after the first
    pub segment_delay: Duration,
    /// Narration seconds per segment when choosing the segment count
    pub target_segment_secs: f64,
    /// Seed for the fallback-query RNG; random when unset
    pub random_seed: Option<u64>,
    pub scoring: ScoringWeights,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            segment_delay: DEFAULT_SEGMENT_DELAY,
            target_segment_secs: DEFAULT_TARGET_SEGMENT_SECS,
            random_seed: None,
            scoring: ScoringWeights::default(),
        }
    }
}

impl VisualsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = ScoringWeights::default();
        Self {
            segment_delay: std::env::var("VISUALS_SEGMENT_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_SEGMENT_DELAY),
            target_segment_secs: std::env::var("VISUALS_TARGET_SEGMENT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TARGET_SEGMENT_SECS),
            random_seed: std::env::var("VISUALS_RANDOM_SEED")
                .ok()
                .and_then(|s| s.parse().ok()),
            scoring: ScoringWeights {
                min_total_score: std::env::var("VISUALS_MIN_SCORE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.min_total_score),
                first_segment_min_score: std::env::var("VISUALS_FIRST_MIN_SCORE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.first_segment_min_score),
                ..defaults
            },
        }
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> VisualsResult<()> {
        if !self.target_segment_secs.is_finite() || self.target_segment_secs <= 0.0 {
            return Err(VisualsError::config_error(format!(
                "target_segment_secs must be positive, got {}",
                self.target_segment_secs
            )));
        }
        self.scoring.validate().map_err(VisualsError::config_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisualsConfig::default();
        assert_eq!(config.segment_delay, Duration::from_millis(1500));
        assert_eq!(config.target_segment_secs, 20.0);
        assert!(config.random_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        let config = VisualsConfig::from_env();
        if std::env::var("VISUALS_SEGMENT_DELAY_MS").is_err() {
            assert_eq!(config.segment_delay, DEFAULT_SEGMENT_DELAY);
        }
        if std::env::var("VISUALS_TARGET_SEGMENT_SECS").is_err() {
            assert_eq!(config.target_segment_secs, DEFAULT_TARGET_SEGMENT_SECS);
        }
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let config = VisualsConfig {
            scoring: ScoringWeights {
                min_total_score: 0.6,
                first_segment_min_score: 0.4,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(VisualsError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_target() {
        let config = VisualsConfig {
            target_segment_secs: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
