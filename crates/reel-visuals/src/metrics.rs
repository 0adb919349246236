//! Pipeline metrics.
//!
//! Counters are emitted through the `metrics` facade; installing a recorder
//! (Prometheus or otherwise) is left to the embedding application.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const SCENE_IMAGES_TOTAL: &str = "reel_scene_images_total";
    pub const SOURCE_REQUESTS_TOTAL: &str = "reel_source_requests_total";
    pub const SEGMENTATION_TOTAL: &str = "reel_segmentation_total";
    pub const PIPELINE_DURATION_SECONDS: &str = "reel_pipeline_duration_seconds";
}

/// Outcome label for a provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// A candidate was accepted
    Hit,
    /// The provider answered but nothing qualified
    Miss,
    /// The call failed; `kind` is the error's short label
    Error { kind: &'static str },
}

impl SourceOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceOutcome::Hit => "hit",
            SourceOutcome::Miss => "miss",
            SourceOutcome::Error { .. } => "error",
        }
    }

    /// Error label, `none` unless the call failed.
    pub fn error_kind(&self) -> &'static str {
        match self {
            SourceOutcome::Error { kind } => *kind,
            _ => "none",
        }
    }
}

/// Record the cascade step that resolved a scene (or `none`).
pub fn record_scene_image(source: &str) {
    let labels = [("source", source.to_string())];
    counter!(names::SCENE_IMAGES_TOTAL, &labels).increment(1);
}

/// Record one provider call.
pub fn record_source_request(source: &str, outcome: SourceOutcome) {
    let labels = [
        ("source", source.to_string()),
        ("outcome", outcome.as_str().to_string()),
        ("error_kind", outcome.error_kind().to_string()),
    ];
    counter!(names::SOURCE_REQUESTS_TOTAL, &labels).increment(1);
}

/// Record which segmentation strategy a run used.
pub fn record_segmentation(strategy: &str) {
    let labels = [("strategy", strategy.to_string())];
    counter!(names::SEGMENTATION_TOTAL, &labels).increment(1);
}

/// Record end-to-end pipeline duration.
pub fn record_pipeline_duration(duration_secs: f64) {
    histogram!(names::PIPELINE_DURATION_SECONDS).record(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(SourceOutcome::Hit.as_str(), "hit");
        assert_eq!(SourceOutcome::Miss.as_str(), "miss");
        let failed = SourceOutcome::Error { kind: "timeout" };
        assert_eq!(failed.as_str(), "error");
        assert_eq!(failed.error_kind(), "timeout");
        assert_eq!(SourceOutcome::Miss.error_kind(), "none");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_scene_image("stock_photo");
        record_source_request("pexels", SourceOutcome::Miss);
        record_source_request("pexels", SourceOutcome::Error { kind: "http_status" });
        record_segmentation("uniform");
        record_pipeline_duration(0.25);
    }
}
