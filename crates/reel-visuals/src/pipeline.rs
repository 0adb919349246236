//! End-to-end visual selection.
//!
//! Validates the request, settles the story's entity, segments the narration
//! and resolves one image (or an explicit "no image") per segment.

use std::sync::Arc;
use std::time::Instant;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use reel_models::{RunId, SceneImage, SceneSegment, VisualRequest};
use reel_sources::{EntityDirectory, ImageProviders, SourcesConfig};

use crate::cascade::ImageOrchestrator;
use crate::config::VisualsConfig;
use crate::error::VisualsResult;
use crate::logging::RunLogger;
use crate::metrics::{record_pipeline_duration, record_segmentation};
use crate::scorer::CandidateScorer;
use crate::segmenter::{SceneSegmenter, SegmentationStrategy};
use crate::translator::QueryTranslator;

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VisualPlan {
    pub run_id: RunId,
    pub strategy: SegmentationStrategy,
    /// Entity the visuals were anchored on, given or detected
    pub entity: Option<String>,
    pub segments: Vec<SceneSegment>,
    /// One per segment, in timeline order
    pub images: Vec<SceneImage>,
}

impl VisualPlan {
    pub fn resolved_count(&self) -> usize {
        self.images.iter().filter(|i| i.has_image()).count()
    }
}

/// The content-aware visual selection pipeline.
#[derive(Debug)]
pub struct VisualPipeline {
    segmenter: SceneSegmenter,
    orchestrator: ImageOrchestrator,
    directory: EntityDirectory,
}

impl VisualPipeline {
    /// Build a pipeline over an explicit set of providers.
    pub fn new(config: VisualsConfig, providers: ImageProviders) -> VisualsResult<Self> {
        config.validate()?;

        let translator = Arc::new(match config.random_seed {
            Some(seed) => QueryTranslator::with_seed(seed),
            None => QueryTranslator::default(),
        });
        let segmenter =
            SceneSegmenter::new(translator.clone()).with_target_segment_secs(config.target_segment_secs);
        let orchestrator = ImageOrchestrator::new(providers, translator, CandidateScorer::new(config.scoring))
            .with_segment_delay(config.segment_delay);

        Ok(Self {
            segmenter,
            orchestrator,
            directory: EntityDirectory::default(),
        })
    }

    /// Build a pipeline with configuration and providers from the environment.
    pub fn from_env() -> VisualsResult<Self> {
        let sources = SourcesConfig::from_env();
        let providers = ImageProviders::from_config(&sources)?;
        Self::new(VisualsConfig::from_env(), providers)
    }

    pub fn with_directory(mut self, directory: EntityDirectory) -> Self {
        self.directory = directory;
        self
    }

    /// The entity to anchor visuals on.
    ///
    /// An explicit entity wins; otherwise a known brand is looked for in the
    /// headline, then in the hook.
    pub fn resolve_entity(&self, request: &VisualRequest) -> Option<String> {
        if let Some(entity) = request.entity() {
            return Some(entity.to_string());
        }
        request
            .headline()
            .and_then(|h| self.directory.detect(h))
            .or_else(|| self.directory.detect(&request.script.hook))
            .map(|e| e.name.clone())
    }

    /// Run the pipeline for one narration.
    ///
    /// Only an invalid request is an error; provider trouble degrades to
    /// segments without an image.
    pub async fn run(&self, request: &VisualRequest) -> VisualsResult<VisualPlan> {
        request.validate()?;

        let run_id = RunId::new();
        let logger = RunLogger::new(&run_id, request.total_duration);
        let span = logger.span();

        async {
            let started = Instant::now();

            let entity = self.resolve_entity(request);
            if let Some(entity) = &entity {
                logger.record_entity(entity, request.entity().is_none());
            }

            let segmentation = self.segmenter.segment(
                &request.script,
                request.total_duration,
                entity.as_deref(),
                request.headline(),
            );
            record_segmentation(segmentation.strategy.as_str());
            logger.record_segmentation(segmentation.strategy, segmentation.segments.len());

            let images = self
                .orchestrator
                .resolve_all(&segmentation.segments, entity.as_deref())
                .await;

            let plan = VisualPlan {
                run_id: run_id.clone(),
                strategy: segmentation.strategy,
                entity,
                segments: segmentation.segments,
                images,
            };

            let resolved = plan.resolved_count();
            if resolved == 0 && self.orchestrator.providers().configured_count() > 0 {
                logger.log_warning("no segment received an image");
            }
            let elapsed = started.elapsed().as_secs_f64();
            record_pipeline_duration(elapsed);
            logger.log_completion(resolved, plan.images.len(), elapsed);

            Ok(plan)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reel_models::{ImageSourceTag, NarrationScript, RequestError};

    use super::*;
    use crate::error::VisualsError;

    fn pipeline() -> VisualPipeline {
        let config = VisualsConfig {
            segment_delay: Duration::ZERO,
            random_seed: Some(1),
            ..Default::default()
        };
        VisualPipeline::new(config, ImageProviders::empty()).unwrap()
    }

    fn script() -> NarrationScript {
        NarrationScript::new(
            "OpenAI lanza un nuevo modelo.",
            "El modelo escribe código y responde preguntas.",
            "En mi opinión cambiará la programación.",
            "Síguenos.",
        )
    }

    #[test]
    fn test_resolve_entity_prefers_explicit() {
        let pipeline = pipeline();
        let request = VisualRequest::new(script(), 30.0).with_entity("Microsoft");
        assert_eq!(pipeline.resolve_entity(&request).as_deref(), Some("Microsoft"));
    }

    #[test]
    fn test_resolve_entity_from_headline_then_hook() {
        let pipeline = pipeline();
        let request = VisualRequest::new(script(), 30.0).with_headline("Nvidia responde a la competencia");
        assert_eq!(pipeline.resolve_entity(&request).as_deref(), Some("Nvidia"));

        let request = VisualRequest::new(script(), 30.0);
        assert_eq!(pipeline.resolve_entity(&request).as_deref(), Some("OpenAI"));

        let request = VisualRequest::new(NarrationScript::new("Hoy hablamos de robots", "", "", ""), 30.0);
        assert!(pipeline.resolve_entity(&request).is_none());
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_duration() {
        let pipeline = pipeline();
        for duration in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = pipeline.run(&VisualRequest::new(script(), duration)).await;
            assert!(matches!(
                result,
                Err(VisualsError::InvalidRequest(RequestError::InvalidDuration(_)))
            ));
        }
    }

    #[tokio::test]
    async fn test_run_without_providers_yields_no_images() {
        let plan = pipeline().run(&VisualRequest::new(script(), 30.0)).await.unwrap();

        assert_eq!(plan.entity.as_deref(), Some("OpenAI"));
        assert_eq!(plan.images.len(), plan.segments.len());
        assert_eq!(plan.resolved_count(), 0);
        assert!(plan
            .images
            .iter()
            .all(|i| i.image_url.is_none() && i.source == ImageSourceTag::None));
        assert_eq!(plan.images[0].query, "OpenAI");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = VisualsConfig {
            target_segment_secs: -1.0,
            ..Default::default()
        };
        assert!(VisualPipeline::new(config, ImageProviders::empty()).is_err());
    }
}
