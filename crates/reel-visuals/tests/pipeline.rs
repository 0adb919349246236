//! Pipeline integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reel_models::{ImageCandidate, ImageSourceTag, NarrationScript, VisualRequest};
use reel_sources::{ImageProviders, ImageSource, SourceResult, SourcesConfig};
use reel_visuals::{SegmentationStrategy, VisualPipeline, VisualsConfig};

/// In-process provider answering fixed queries.
#[derive(Default)]
struct FakeSource {
    name: &'static str,
    answers: HashMap<String, Vec<ImageCandidate>>,
    fallback: Vec<ImageCandidate>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    fn named(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    fn answering(mut self, query: &str, candidates: Vec<ImageCandidate>) -> Self {
        self.answers.insert(query.to_string(), candidates);
        self
    }

    fn always(mut self, candidates: Vec<ImageCandidate>) -> Self {
        self.fallback = candidates;
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSource for FakeSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<ImageCandidate>> {
        self.calls.lock().unwrap().push(query.to_string());
        Ok(self
            .answers
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

fn config() -> VisualsConfig {
    VisualsConfig {
        segment_delay: Duration::ZERO,
        random_seed: Some(17),
        ..Default::default()
    }
}

fn robots_script() -> NarrationScript {
    NarrationScript::new(
        "Los robots humanoides llegan a las fábricas.",
        "Cada robot humanoide aprende tareas nuevas en la cadena de montaje.",
        "En mi opinión los robots cambiarán el empleo industrial.",
        "",
    )
}

fn assert_contiguous(images: &[reel_models::SceneImage], end: u32) {
    assert_eq!(images[0].start_second, 0);
    assert_eq!(images.last().unwrap().end_second, end);
    for pair in images.windows(2) {
        assert_eq!(pair[0].end_second, pair[1].start_second);
        assert_eq!(pair[0].scene_index + 1, pair[1].scene_index);
    }
}

#[tokio::test]
async fn test_unconfigured_providers_yield_no_images() {
    let script = NarrationScript::new(
        "Nvidia bate récords.",
        "Sus chips dominan los centros de datos del planeta.",
        "Los inversores celebran.",
        "",
    );
    let providers = ImageProviders::from_config(&SourcesConfig::unconfigured()).unwrap();
    let pipeline = VisualPipeline::new(config(), providers).unwrap();

    let plan = pipeline.run(&VisualRequest::new(script, 55.0)).await.unwrap();

    assert_eq!(plan.strategy, SegmentationStrategy::Uniform);
    let bounds: Vec<(u32, u32)> = plan
        .images
        .iter()
        .map(|i| (i.start_second, i.end_second))
        .collect();
    assert_eq!(bounds, vec![(0, 18), (18, 37), (37, 55)]);
    assert!(plan
        .images
        .iter()
        .all(|i| i.image_url.is_none() && i.source == ImageSourceTag::None));
}

#[tokio::test]
async fn test_third_priority_logo_step_names_its_tag() {
    let logo_primary = Arc::new(FakeSource::named("clearbit"));
    let logo_secondary = Arc::new(FakeSource::named("logo_dev"));
    let web = Arc::new(FakeSource::named("google_cse").answering(
        "Nvidia logo",
        vec![ImageCandidate::new("https://cdn.example.com/nvidia-logo.png", "Nvidia logo", 800, 800)],
    ));
    let providers = ImageProviders::empty()
        .with_logo_primary(logo_primary.clone())
        .with_logo_secondary(logo_secondary.clone())
        .with_web_search(web.clone());
    let pipeline = VisualPipeline::new(config(), providers).unwrap();

    let request = VisualRequest::new(robots_script(), 30.0).with_entity("Nvidia");
    let plan = pipeline.run(&request).await.unwrap();

    let first = &plan.images[0];
    assert_eq!(first.source, ImageSourceTag::LogoSearch);
    assert_eq!(first.image_url.as_deref(), Some("https://cdn.example.com/nvidia-logo.png"));
    assert_eq!(logo_primary.calls(), vec!["Nvidia".to_string()]);
    assert_eq!(logo_secondary.calls(), vec!["Nvidia".to_string()]);
    assert_eq!(web.calls()[0], "Nvidia logo");
    assert_contiguous(&plan.images, 30);
}

#[tokio::test]
async fn test_generic_stock_results_never_selected() {
    let stock = Arc::new(FakeSource::named("pexels").always(vec![ImageCandidate::new(
        "https://images.pexels.com/photos/1/meeting.jpeg",
        "business meeting stock photo",
        1080,
        1920,
    )]));
    let providers = ImageProviders::empty().with_stock_photo(stock.clone());
    let pipeline = VisualPipeline::new(config(), providers).unwrap();

    let script = NarrationScript::new(
        "La IA ya controla robots.",
        "Los robots con IA aprenden solos.",
        "",
        "",
    );
    let plan = pipeline.run(&VisualRequest::new(script, 24.0)).await.unwrap();

    assert!(!stock.calls().is_empty());
    assert_eq!(plan.resolved_count(), 0);
    assert!(plan.images.iter().all(|i| i.source == ImageSourceTag::None));
}

#[tokio::test]
async fn test_segments_are_paced() {
    let delay = Duration::from_millis(30);
    let pipeline = VisualPipeline::new(
        VisualsConfig {
            segment_delay: delay,
            ..config()
        },
        ImageProviders::empty(),
    )
    .unwrap();

    let started = Instant::now();
    let plan = pipeline
        .run(&VisualRequest::new(robots_script(), 60.0))
        .await
        .unwrap();

    assert_eq!(plan.images.len(), 3);
    assert!(started.elapsed() >= delay * 2);
}

#[tokio::test]
async fn test_pexels_backed_run_resolves_every_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(header("Authorization", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_results": 1,
            "photos": [{
                "id": 1,
                "width": 1080,
                "height": 1920,
                "alt": "Humanoid robot working in a factory",
                "src": {
                    "original": "https://images.pexels.com/photos/1/robot.jpeg",
                    "large2x": "https://images.pexels.com/photos/1/robot.jpeg?w=1080"
                }
            }]
        })))
        .mount(&server)
        .await;

    let sources = SourcesConfig {
        clearbit_enabled: false,
        pexels_api_key: Some("test-key".to_string()),
        pexels_base_url: server.uri(),
        ..SourcesConfig::unconfigured()
    };
    let providers = ImageProviders::from_config(&sources).unwrap();
    let pipeline = VisualPipeline::new(config(), providers).unwrap();

    let plan = pipeline
        .run(&VisualRequest::new(robots_script(), 30.0))
        .await
        .unwrap();

    assert!(plan.entity.is_none());
    assert_eq!(plan.images.len(), 2);
    for image in &plan.images {
        assert_eq!(image.source, ImageSourceTag::StockPhoto);
        assert_eq!(image.query, "humanoid robot");
        assert_eq!(
            image.image_url.as_deref(),
            Some("https://images.pexels.com/photos/1/robot.jpeg?w=1080")
        );
    }
    assert_contiguous(&plan.images, 30);
}
