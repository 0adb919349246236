//! Shared data models for the visual selection pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Narration scripts and visual requests
//! - Scene segments and their search queries
//! - Image candidates and resolved scene images
//! - Candidate scoring weights

pub mod image;
pub mod narration;
pub mod query;
pub mod run;
pub mod scoring;
pub mod segment;

// Re-export common types
pub use image::{ImageCandidate, ImageSourceTag, SceneImage};
pub use narration::{NarrationScript, NarrationSection, RequestError, VisualRequest};
pub use query::{QueryLanguage, SmartQueryResult};
pub use run::RunId;
pub use scoring::ScoringWeights;
pub use segment::{QueryKind, SceneSegment};
