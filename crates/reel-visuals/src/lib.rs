//! Content-aware visual selection for narrated short videos.
//!
//! Given a timed narration, the pipeline:
//! 1. Splits the timeline into 2 or 3 segments, preferring cuts on discourse
//!    markers ([`segmenter`], [`analyzer`])
//! 2. Derives search queries per segment ([`translator`])
//! 3. Resolves each segment to one image through a cascade of providers,
//!    scoring candidates for relevance ([`cascade`], [`scorer`])
//!
//! A segment may legitimately end up without an image.

pub mod analyzer;
pub mod cascade;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod scorer;
pub mod segmenter;
pub mod text;
pub mod translator;

pub use analyzer::{KeywordExtractor, TransitionDetector, TransitionMatch};
pub use cascade::{Attempt, ImageOrchestrator, Selection};
pub use config::VisualsConfig;
pub use error::{VisualsError, VisualsResult};
pub use logging::RunLogger;
pub use pipeline::{VisualPipeline, VisualPlan};
pub use scorer::{CandidateScorer, ScoredCandidate};
pub use segmenter::{SceneSegmenter, Segmentation, SegmentationStrategy};
pub use translator::QueryTranslator;
