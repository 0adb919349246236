//! Per-run structured logging.
//!
//! A run's span is opened before anything is known about the narration and
//! filled in as the pipeline settles the entity and the segmentation, so
//! every later event carries that context.

use tracing::field::Empty;
use tracing::{info, warn, Span};

use reel_models::RunId;

use crate::segmenter::SegmentationStrategy;

/// Logger bound to one pipeline run.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    span: Span,
}

impl RunLogger {
    pub fn new(run_id: &RunId, total_duration: f64) -> Self {
        let run_id = run_id.to_string();
        let span = tracing::info_span!(
            "visual_run",
            run_id = %run_id,
            duration_secs = total_duration,
            entity = Empty,
            strategy = Empty,
            segments = Empty
        );
        Self { run_id, span }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// The run's span; instrument the run's future with it.
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// Attach the entity visuals are anchored on.
    pub fn record_entity(&self, entity: &str, detected: bool) {
        self.span.record("entity", entity);
        if detected {
            info!(run_id = %self.run_id, entity, "Detected entity in narration");
        }
    }

    /// Attach the segmentation outcome.
    pub fn record_segmentation(&self, strategy: SegmentationStrategy, segments: usize) {
        self.span.record("strategy", strategy.as_str());
        self.span.record("segments", segments);
        info!(
            run_id = %self.run_id,
            strategy = strategy.as_str(),
            segments,
            "Narration segmented"
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(run_id = %self.run_id, "Run warning: {}", message);
    }

    pub fn log_completion(&self, resolved: usize, total: usize, elapsed_secs: f64) {
        info!(
            run_id = %self.run_id,
            resolved,
            total,
            elapsed_secs,
            "Visual selection finished"
        );
    }
}
