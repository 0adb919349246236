//! Image source cascade.
//!
//! Each segment is resolved by walking an ordered list of attempts, one per
//! (provider, query) pair, and stopping at the first that yields an
//! acceptable image. The list is plain data so the order can be inspected
//! and tested without touching the network.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use reel_models::{ImageCandidate, ImageSourceTag, QueryKind, SceneImage, SceneSegment};
use reel_sources::http::is_usable_image_url;
use reel_sources::{ImageProviders, ImageSource};

use crate::metrics::{record_scene_image, record_source_request, SourceOutcome};
use crate::scorer::CandidateScorer;
use crate::translator::QueryTranslator;

/// Default pause between segments, to stay under provider rate limits.
pub const DEFAULT_SEGMENT_DELAY: Duration = Duration::from_millis(1500);

/// How an attempt picks from the candidates a provider returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Best candidate by relevance against `keywords`, subject to the
    /// segment's minimum score
    Scored { keywords: Vec<String> },
    /// First candidate with a usable URL
    FirstUsable,
}

/// One step of a segment's cascade.
#[derive(Clone)]
pub struct Attempt {
    pub tag: ImageSourceTag,
    pub provider: Arc<dyn ImageSource>,
    pub query: String,
    pub selection: Selection,
}

impl Attempt {
    fn new(
        tag: ImageSourceTag,
        provider: &Arc<dyn ImageSource>,
        query: impl Into<String>,
        selection: Selection,
    ) -> Self {
        Self {
            tag,
            provider: Arc::clone(provider),
            query: query.into(),
            selection,
        }
    }

    fn scored(tag: ImageSourceTag, provider: &Arc<dyn ImageSource>, query: String) -> Self {
        let keywords = query_terms(&query);
        Self::new(tag, provider, query, Selection::Scored { keywords })
    }
}

impl fmt::Debug for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attempt")
            .field("tag", &self.tag)
            .field("provider", &self.provider.name())
            .field("query", &self.query)
            .field("selection", &self.selection)
            .finish()
    }
}

/// Resolves scene segments to images through the provider cascade.
pub struct ImageOrchestrator {
    providers: ImageProviders,
    translator: Arc<QueryTranslator>,
    scorer: CandidateScorer,
    segment_delay: Duration,
}

impl ImageOrchestrator {
    pub fn new(providers: ImageProviders, translator: Arc<QueryTranslator>, scorer: CandidateScorer) -> Self {
        Self {
            providers,
            translator,
            scorer,
            segment_delay: DEFAULT_SEGMENT_DELAY,
        }
    }

    pub fn with_segment_delay(mut self, delay: Duration) -> Self {
        self.segment_delay = delay;
        self
    }

    pub fn providers(&self) -> &ImageProviders {
        &self.providers
    }

    /// The ordered attempts for a segment.
    ///
    /// Unconfigured providers and empty queries produce no attempt.
    pub fn plan(&self, segment: &SceneSegment, entity: Option<&str>) -> Vec<Attempt> {
        let mut attempts = Vec::new();
        let p = &self.providers;

        match &segment.query {
            QueryKind::EntityLogo { entity } => {
                let entity = entity.trim();
                if entity.is_empty() {
                    return attempts;
                }
                if let Some(source) = &p.logo_primary {
                    attempts.push(Attempt::new(ImageSourceTag::LogoPrimary, source, entity, Selection::FirstUsable));
                }
                if let Some(source) = &p.logo_secondary {
                    attempts.push(Attempt::new(ImageSourceTag::LogoSecondary, source, entity, Selection::FirstUsable));
                }
                if let Some(source) = &p.web_search {
                    attempts.push(Attempt::new(
                        ImageSourceTag::LogoSearch,
                        source,
                        format!("{} logo", entity),
                        Selection::FirstUsable,
                    ));
                }
                if let Some(source) = &p.stock_photo {
                    attempts.push(Attempt::scored(ImageSourceTag::EntityStock, source, entity.to_string()));
                }
            }
            QueryKind::Keywords { query } => {
                let primary = query.trim();
                if !primary.is_empty() {
                    if let Some(source) = &p.stock_photo {
                        attempts.push(Attempt::scored(ImageSourceTag::StockPhoto, source, primary.to_string()));
                    }
                    if let Some(source) = &p.web_search {
                        attempts.push(Attempt::new(ImageSourceTag::WebSearch, source, primary, Selection::FirstUsable));
                    }
                }

                // Remaining steps all go through stock search
                let Some(stock) = &p.stock_photo else {
                    return attempts;
                };

                let queries = self.translator.build_queries(&segment.keywords, &segment.text, entity);
                let mut tried: Vec<String> = vec![primary.to_lowercase()];
                for alternative in queries.alternatives {
                    if tried.contains(&alternative.to_lowercase()) {
                        continue;
                    }
                    tried.push(alternative.to_lowercase());
                    attempts.push(Attempt::scored(ImageSourceTag::AlternativeQuery, stock, alternative));
                }

                let simplified = self.translator.simplify(primary);
                if !simplified.is_empty() && !tried.contains(&simplified.to_lowercase()) {
                    attempts.push(Attempt::scored(ImageSourceTag::SimplifiedQuery, stock, simplified));
                }
            }
        }

        attempts
    }

    /// Resolve one segment, falling back to an explicit "no image".
    pub async fn resolve_segment(&self, segment: &SceneSegment, entity: Option<&str>) -> SceneImage {
        let attempts = self.plan(segment, entity);
        debug!(
            segment = segment.index,
            attempts = ?attempts,
            "Planned image cascade"
        );

        for attempt in &attempts {
            let provider = attempt.provider.name();
            match attempt.provider.search(&attempt.query).await {
                Ok(candidates) => {
                    if let Some(url) = self.select(attempt, &candidates, segment.is_first()) {
                        record_source_request(provider, SourceOutcome::Hit);
                        record_scene_image(attempt.tag.as_str());
                        info!(
                            segment = segment.index,
                            source = %attempt.tag,
                            provider,
                            query = %attempt.query,
                            "Resolved scene image"
                        );
                        return SceneImage::resolved(
                            segment.index,
                            segment.start_second,
                            segment.end_second,
                            url,
                            attempt.query.clone(),
                            attempt.tag,
                        );
                    }
                    record_source_request(provider, SourceOutcome::Miss);
                    debug!(
                        segment = segment.index,
                        provider,
                        query = %attempt.query,
                        candidates = candidates.len(),
                        "No acceptable candidate"
                    );
                }
                Err(e) => {
                    record_source_request(provider, SourceOutcome::Error { kind: e.kind() });
                    warn!(
                        segment = segment.index,
                        provider,
                        query = %attempt.query,
                        error_kind = e.kind(),
                        retryable = e.is_retryable(),
                        "Image source failed: {}", e
                    );
                }
            }
        }

        record_scene_image(ImageSourceTag::None.as_str());
        info!(segment = segment.index, "No image found for segment");
        SceneImage::none(
            segment.index,
            segment.start_second,
            segment.end_second,
            segment.query.as_text(),
        )
    }

    /// Resolve every segment in order, pausing between segments.
    pub async fn resolve_all(&self, segments: &[SceneSegment], entity: Option<&str>) -> Vec<SceneImage> {
        let mut images = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 && !self.segment_delay.is_zero() {
                tokio::time::sleep(self.segment_delay).await;
            }
            images.push(self.resolve_segment(segment, entity).await);
        }
        images
    }

    fn select(&self, attempt: &Attempt, candidates: &[ImageCandidate], first_segment: bool) -> Option<String> {
        match &attempt.selection {
            Selection::FirstUsable => candidates
                .iter()
                .find(|c| is_usable_image_url(&c.url))
                .map(|c| c.url.clone()),
            Selection::Scored { keywords } => self
                .scorer
                .select_best(candidates, keywords, first_segment)
                .map(|best| best.url),
        }
    }
}

impl fmt::Debug for ImageOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageOrchestrator")
            .field("providers", &self.providers)
            .field("segment_delay", &self.segment_delay)
            .finish()
    }
}

/// Distinct lowercase words of a query.
fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in query.split_whitespace() {
        let word = word.to_lowercase();
        if !terms.contains(&word) {
            terms.push(word);
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Instant;

    use async_trait::async_trait;
    use reel_models::NarrationScript;
    use reel_sources::{SourceError, SourceResult};

    use super::*;
    use crate::segmenter::SceneSegmenter;

    #[derive(Default)]
    struct FakeSource {
        name: &'static str,
        results: HashMap<String, Vec<ImageCandidate>>,
        failing: bool,
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
            self.results.insert(query.to_string(), candidates);
            self
        }

        fn failing(mut self) -> Self {
            self.failing = true;
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
            if self.failing {
                return Err(SourceError::http_status(self.name, 503, "unavailable"));
            }
            Ok(self.results.get(query).cloned().unwrap_or_default())
        }
    }

    fn portrait(url: &str, alt: &str) -> ImageCandidate {
        ImageCandidate::new(url, alt, 1080, 1920)
    }

    fn orchestrator(providers: ImageProviders) -> ImageOrchestrator {
        ImageOrchestrator::new(
            providers,
            Arc::new(QueryTranslator::with_seed(9)),
            CandidateScorer::default(),
        )
        .with_segment_delay(Duration::ZERO)
    }

    fn segment(index: usize, query: QueryKind, keywords: &[&str]) -> SceneSegment {
        SceneSegment {
            index,
            start_second: index as u32 * 10,
            end_second: index as u32 * 10 + 10,
            text: keywords.join(" "),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            query,
        }
    }

    #[test]
    fn test_plan_entity_logo_order() {
        let providers = ImageProviders::empty()
            .with_logo_primary(Arc::new(FakeSource::named("clearbit")))
            .with_logo_secondary(Arc::new(FakeSource::named("logo_dev")))
            .with_web_search(Arc::new(FakeSource::named("google_cse")))
            .with_stock_photo(Arc::new(FakeSource::named("pexels")));
        let plan = orchestrator(providers).plan(&segment(0, QueryKind::entity_logo("Nvidia"), &[]), Some("Nvidia"));

        let steps: Vec<(ImageSourceTag, &str)> = plan.iter().map(|a| (a.tag, a.query.as_str())).collect();
        assert_eq!(
            steps,
            vec![
                (ImageSourceTag::LogoPrimary, "Nvidia"),
                (ImageSourceTag::LogoSecondary, "Nvidia"),
                (ImageSourceTag::LogoSearch, "Nvidia logo"),
                (ImageSourceTag::EntityStock, "Nvidia"),
            ]
        );
        assert_eq!(plan[3].selection, Selection::Scored { keywords: vec!["nvidia".to_string()] });
    }

    #[test]
    fn test_plan_keywords_order_and_skips() {
        let providers = ImageProviders::empty()
            .with_web_search(Arc::new(FakeSource::named("google_cse")))
            .with_stock_photo(Arc::new(FakeSource::named("pexels")));
        let seg = segment(1, QueryKind::keywords("robots factory batteries"), &["robots", "fabrica", "baterias"]);
        let plan = orchestrator(providers).plan(&seg, Some("Tesla"));

        let tags: Vec<ImageSourceTag> = plan.iter().map(|a| a.tag).collect();
        assert_eq!(
            tags,
            vec![
                ImageSourceTag::StockPhoto,
                ImageSourceTag::WebSearch,
                ImageSourceTag::AlternativeQuery,
                ImageSourceTag::AlternativeQuery,
                ImageSourceTag::SimplifiedQuery,
            ]
        );
        assert_eq!(plan[2].query, "Tesla robots");
        assert_eq!(plan[3].query, "factory batteries");
        assert_eq!(plan[4].query, "robots factory");
    }

    #[test]
    fn test_plan_without_providers_is_empty() {
        let orchestrator = orchestrator(ImageProviders::empty());
        assert!(orchestrator
            .plan(&segment(0, QueryKind::entity_logo("Tesla"), &[]), Some("Tesla"))
            .is_empty());
        assert!(orchestrator
            .plan(&segment(1, QueryKind::keywords("robot"), &["robot"]), None)
            .is_empty());
    }

    #[test]
    fn test_plan_skips_empty_primary() {
        let providers = ImageProviders::empty()
            .with_web_search(Arc::new(FakeSource::named("google_cse")))
            .with_stock_photo(Arc::new(FakeSource::named("pexels")));
        let plan = orchestrator(providers).plan(&segment(1, QueryKind::keywords(""), &[]), None);
        assert!(plan
            .iter()
            .all(|a| a.tag != ImageSourceTag::StockPhoto && a.tag != ImageSourceTag::WebSearch));
        assert!(plan.iter().all(|a| !a.query.is_empty()));
    }

    #[test]
    fn test_plan_from_segmented_keywords_with_entity() {
        let translator = Arc::new(QueryTranslator::with_seed(11));
        let script = NarrationScript::new(
            "Tesla presenta su robot humanoide Optimus.",
            "El robot trabaja en fábricas de baterías y aprende tareas nuevas cada semana.",
            "Creo que los robots cambiarán el empleo industrial.",
            "Síguenos para más noticias.",
        );
        let segmentation = SceneSegmenter::new(translator.clone()).segment(&script, 30.0, Some("Tesla"), None);
        let seg = &segmentation.segments[1];
        assert_eq!(seg.keywords[0], "tesla");

        let providers = ImageProviders::empty().with_stock_photo(Arc::new(FakeSource::named("pexels")));
        let orchestrator = ImageOrchestrator::new(providers, translator, CandidateScorer::default());
        let plan = orchestrator.plan(seg, Some("Tesla"));

        let steps: Vec<(ImageSourceTag, &str)> = plan.iter().map(|a| (a.tag, a.query.as_str())).collect();
        assert_eq!(
            steps,
            vec![
                (ImageSourceTag::StockPhoto, "tesla robot batteries"),
                (ImageSourceTag::AlternativeQuery, "Tesla robot"),
                (ImageSourceTag::AlternativeQuery, "robot batteries trabaja"),
            ]
        );
    }

    #[tokio::test]
    async fn test_logo_secondary_resolves_after_primary_miss() {
        let primary = Arc::new(FakeSource::named("clearbit"));
        let secondary = Arc::new(
            FakeSource::named("logo_dev")
                .answering("Nvidia", vec![portrait("https://img.logo.dev/nvidia.com?size=512", "Nvidia logo")]),
        );
        let providers = ImageProviders::empty()
            .with_logo_primary(primary.clone())
            .with_logo_secondary(secondary.clone());

        let image = orchestrator(providers)
            .resolve_segment(&segment(0, QueryKind::entity_logo("Nvidia"), &[]), Some("Nvidia"))
            .await;

        assert_eq!(image.source, ImageSourceTag::LogoSecondary);
        assert_eq!(image.image_url.as_deref(), Some("https://img.logo.dev/nvidia.com?size=512"));
        assert_eq!(primary.calls(), vec!["Nvidia".to_string()]);
        assert_eq!(secondary.calls(), vec!["Nvidia".to_string()]);
    }

    #[tokio::test]
    async fn test_logo_search_skips_unusable_urls() {
        let web = Arc::new(FakeSource::named("google_cse").answering(
            "Tesla logo",
            vec![
                portrait("https://example.com/tesla.svg", "Tesla logo"),
                portrait("https://example.com/tesla.png", "Tesla logo"),
            ],
        ));
        let providers = ImageProviders::empty()
            .with_logo_primary(Arc::new(FakeSource::named("clearbit").failing()))
            .with_web_search(web);

        let image = orchestrator(providers)
            .resolve_segment(&segment(0, QueryKind::entity_logo("Tesla"), &[]), Some("Tesla"))
            .await;

        assert_eq!(image.source, ImageSourceTag::LogoSearch);
        assert_eq!(image.image_url.as_deref(), Some("https://example.com/tesla.png"));
        assert_eq!(image.query, "Tesla logo");
    }

    #[tokio::test]
    async fn test_alternative_query_after_irrelevant_stock_and_failed_web() {
        let stock = Arc::new(
            FakeSource::named("pexels")
                .answering(
                    "robots factory batteries",
                    vec![portrait("https://images.pexels.com/1.jpg", "business meeting stock photo")],
                )
                .answering(
                    "Tesla robots",
                    vec![portrait("https://images.pexels.com/2.jpg", "Tesla humanoid robots at work")],
                ),
        );
        let web = Arc::new(FakeSource::named("google_cse").failing());
        let providers = ImageProviders::empty()
            .with_stock_photo(stock.clone())
            .with_web_search(web.clone());

        let seg = segment(1, QueryKind::keywords("robots factory batteries"), &["robots", "fabrica", "baterias"]);
        let image = orchestrator(providers).resolve_segment(&seg, Some("Tesla")).await;

        assert_eq!(image.source, ImageSourceTag::AlternativeQuery);
        assert_eq!(image.image_url.as_deref(), Some("https://images.pexels.com/2.jpg"));
        assert_eq!(image.query, "Tesla robots");
        assert_eq!(web.calls().len(), 1);
        assert_eq!(
            stock.calls(),
            vec!["robots factory batteries".to_string(), "Tesla robots".to_string()]
        );
    }

    #[tokio::test]
    async fn test_all_sources_empty_yields_none() {
        let providers = ImageProviders::empty()
            .with_stock_photo(Arc::new(FakeSource::named("pexels")))
            .with_web_search(Arc::new(FakeSource::named("google_cse")));
        let seg = segment(2, QueryKind::keywords("quantum computer"), &["cuantica"]);

        let image = orchestrator(providers).resolve_segment(&seg, None).await;
        assert_eq!(image.source, ImageSourceTag::None);
        assert!(image.image_url.is_none());
        assert_eq!(image.query, "quantum computer");
        assert_eq!((image.start_second, image.end_second), (20, 30));
    }

    #[tokio::test]
    async fn test_resolve_all_waits_between_segments() {
        let delay = Duration::from_millis(40);
        let orchestrator = orchestrator(ImageProviders::empty()).with_segment_delay(delay);
        let segments = vec![
            segment(0, QueryKind::keywords("a"), &[]),
            segment(1, QueryKind::keywords("b"), &[]),
            segment(2, QueryKind::keywords("c"), &[]),
        ];

        let started = Instant::now();
        let images = orchestrator.resolve_all(&segments, None).await;
        assert!(started.elapsed() >= delay * 2);
        assert_eq!(images.len(), 3);
        assert!(images.iter().enumerate().all(|(i, img)| img.scene_index == i));
    }
}
