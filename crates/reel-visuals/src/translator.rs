//! Keyword translation and search query construction.
//!
//! Narration is usually Spanish while the image providers index English
//! metadata, so keywords are mapped through a small dictionary before they
//! are turned into queries.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::debug;

use reel_models::{QueryLanguage, SmartQueryResult};

use crate::catalog;
use crate::text::{contains_phrase, normalize_phrase, padded};

/// Keywords joined into the primary query.
const PRIMARY_TERMS: usize = 3;

/// Terms kept by [`QueryTranslator::simplify`].
const SIMPLIFIED_TERMS: usize = 2;

/// Generic queries for a broad topic.
#[derive(Debug, Clone)]
pub struct TopicFallback {
    pub topic: String,
    /// Normalized phrases that select this topic; empty for the default
    pub triggers: Vec<String>,
    pub queries: Vec<String>,
}

impl TopicFallback {
    pub fn new(topic: &str, triggers: &[&str], queries: &[&str]) -> Self {
        Self {
            topic: topic.to_string(),
            triggers: triggers.iter().map(|t| normalize_phrase(t)).collect(),
            queries: queries.iter().map(|q| q.to_string()).collect(),
        }
    }
}

/// Translates keywords and builds ranked search queries.
pub struct QueryTranslator {
    dictionary: HashMap<String, String>,
    topics: Vec<TopicFallback>,
    rng: Mutex<StdRng>,
}

impl Default for QueryTranslator {
    fn default() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl std::fmt::Debug for QueryTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryTranslator")
            .field("dictionary", &self.dictionary.len())
            .field("topics", &self.topics.len())
            .finish()
    }
}

impl QueryTranslator {
    /// Build a translator from explicit tables.
    ///
    /// The last topic acts as the default when no trigger matches.
    pub fn new<I>(dictionary: I, topics: Vec<TopicFallback>, rng: StdRng) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let dictionary = dictionary
            .into_iter()
            .map(|(from, to)| (normalize_phrase(&from), to))
            .collect();
        Self {
            dictionary,
            topics,
            rng: Mutex::new(rng),
        }
    }

    /// Built-in tables with a deterministic fallback choice.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let dictionary = catalog::TRANSLATIONS
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()));
        let topics = catalog::TOPIC_FALLBACKS
            .iter()
            .map(|(topic, triggers, queries)| TopicFallback::new(topic, triggers, queries))
            .collect();
        Self::new(dictionary, topics, rng)
    }

    /// English term for one keyword, if the dictionary knows it.
    pub fn lookup(&self, keyword: &str) -> Option<&str> {
        self.dictionary
            .get(&normalize_phrase(keyword))
            .map(String::as_str)
    }

    /// Translate keywords, passing unknown terms through normalized.
    ///
    /// Output is deduplicated, keeping first-seen order.
    pub fn translate(&self, keywords: &[String]) -> Vec<String> {
        self.translate_counting(keywords).0
    }

    /// Translation plus the number of dictionary hits.
    fn translate_counting(&self, keywords: &[String]) -> (Vec<String>, usize) {
        let mut translated: Vec<String> = Vec::with_capacity(keywords.len());
        let mut hits = 0;

        for keyword in keywords {
            let normalized = normalize_phrase(keyword);
            if normalized.is_empty() {
                continue;
            }
            let term = match self.dictionary.get(&normalized) {
                Some(english) => {
                    hits += 1;
                    english.clone()
                }
                None => normalized,
            };
            if !translated.iter().any(|t| t.eq_ignore_ascii_case(&term)) {
                translated.push(term);
            }
        }

        (translated, hits)
    }

    /// Build the primary query and up to two alternatives for a segment.
    pub fn build_queries(
        &self,
        keywords: &[String],
        segment_text: &str,
        entity: Option<&str>,
    ) -> SmartQueryResult {
        let (translated, hits) = self.translate_counting(keywords);
        let primary = join_terms(&translated, 0, PRIMARY_TERMS);

        let mut alternatives: Vec<String> = Vec::new();
        let offer = |candidate: String, alternatives: &mut Vec<String>| {
            let candidate = candidate.trim().to_string();
            if alternatives.len() < SmartQueryResult::MAX_ALTERNATIVES
                && !candidate.is_empty()
                && !candidate.eq_ignore_ascii_case(&primary)
                && !alternatives.iter().any(|a| a.eq_ignore_ascii_case(&candidate))
            {
                alternatives.push(candidate);
            }
        };

        if let Some(entity) = entity.map(str::trim).filter(|e| !e.is_empty()) {
            // Keywords usually lead with the entity itself
            let entity_key = normalize_phrase(entity);
            if let Some(topical) = translated.iter().find(|t| normalize_phrase(t) != entity_key) {
                offer(format!("{} {}", entity, topical), &mut alternatives);
            }
        }
        let distinct = collapse_plurals(&translated);
        if distinct.len() > 1 {
            offer(join_terms(&distinct, 1, PRIMARY_TERMS), &mut alternatives);
        }
        if alternatives.len() < SmartQueryResult::MAX_ALTERNATIVES {
            let mut taken: Vec<&str> = alternatives.iter().map(String::as_str).collect();
            taken.push(&primary);
            if let Some(fallback) = self.topic_fallback(segment_text, keywords, &taken) {
                offer(fallback, &mut alternatives);
            }
        }

        let language = if hits > 0 {
            QueryLanguage::English
        } else {
            QueryLanguage::Source
        };

        debug!(
            primary = %primary,
            alternatives = ?alternatives,
            "Built segment queries"
        );

        SmartQueryResult {
            primary,
            alternatives,
            language,
            original_keywords: keywords.to_vec(),
            translated_keywords: translated,
        }
    }

    /// Reduce a query to its first two distinct translated terms.
    pub fn simplify(&self, query: &str) -> String {
        let words: Vec<String> = query.split_whitespace().map(str::to_string).collect();
        let translated = self.translate(&words);
        join_terms(&translated, 0, SIMPLIFIED_TERMS)
    }

    /// Broad topic for a span of narration, by the first matching trigger.
    pub fn detect_topic(&self, segment_text: &str, keywords: &[String]) -> Option<&TopicFallback> {
        let haystack = padded(&format!("{} {}", segment_text, keywords.join(" ")));
        self.topics
            .iter()
            .find(|t| t.triggers.iter().any(|trigger| contains_phrase(&haystack, trigger)))
            .or_else(|| self.topics.last())
    }

    /// Random generic query for the segment's topic, excluding `taken`.
    fn topic_fallback(&self, segment_text: &str, keywords: &[String], taken: &[&str]) -> Option<String> {
        let topic = self.detect_topic(segment_text, keywords)?;
        let choices: Vec<&String> = topic
            .queries
            .iter()
            .filter(|q| !taken.iter().any(|t| t.eq_ignore_ascii_case(q)))
            .collect();
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        choices.choose(&mut *rng).map(|q| q.to_string())
    }
}

/// Terms with later singular/plural twins dropped ("robot", "robots").
fn collapse_plurals(terms: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(terms.len());
    let mut kept = Vec::with_capacity(terms.len());
    for term in terms {
        let key = singular_key(term);
        if !seen.contains(&key) {
            seen.push(key);
            kept.push(term.clone());
        }
    }
    kept
}

fn singular_key(term: &str) -> String {
    let lower = term.to_lowercase();
    match lower.strip_suffix('s') {
        Some(stem) if stem.chars().count() >= 3 && !stem.ends_with('s') => stem.to_string(),
        _ => lower,
    }
}

fn join_terms(terms: &[String], skip: usize, take: usize) -> String {
    terms
        .iter()
        .skip(skip)
        .take(take)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_translate_known_and_unknown_terms() {
        let translator = QueryTranslator::with_seed(7);
        let out = translator.translate(&kw(&["Inteligencia Artificial", "robots", "Jensen", "IA"]));
        // "ia" collapses onto the phrase translation
        assert_eq!(out, kw(&["artificial intelligence", "robots", "jensen"]));
    }

    #[test]
    fn test_translate_is_deterministic() {
        let a = QueryTranslator::with_seed(1);
        let b = QueryTranslator::with_seed(2);
        let input = kw(&["empresa", "mercado", "tesla"]);
        assert_eq!(a.translate(&input), b.translate(&input));
        assert_eq!(a.translate(&input), kw(&["company", "market", "tesla"]));
        assert!(a.translate(&[]).is_empty());
    }

    #[test]
    fn test_build_queries_primary_and_alternatives() {
        let translator = QueryTranslator::with_seed(3);
        let result = translator.build_queries(
            &kw(&["robots", "fabrica", "baterias", "empleo"]),
            "Los robots llegan a la fabrica",
            Some("Tesla"),
        );
        assert_eq!(result.primary, "robots factory batteries");
        assert_eq!(result.alternatives, kw(&["Tesla robots", "factory batteries jobs"]));
        assert_eq!(result.language, QueryLanguage::English);
        assert_eq!(result.translated_keywords.len(), 4);
    }

    #[test]
    fn test_entity_alternative_skips_entity_keyword() {
        let translator = QueryTranslator::with_seed(3);
        let result = translator.build_queries(
            &kw(&["tesla", "robot", "baterias", "robots", "trabaja"]),
            "Tesla robot baterias",
            Some("Tesla"),
        );
        assert_eq!(result.primary, "tesla robot batteries");
        assert_eq!(result.alternatives, kw(&["Tesla robot", "robot batteries trabaja"]));

        // Nothing topical besides the entity: no entity alternative
        let result = translator.build_queries(&kw(&["tesla"]), "", Some("Tesla"));
        assert!(result.alternatives.iter().all(|a| !a.to_lowercase().starts_with("tesla")));
    }

    #[test]
    fn test_collapse_plurals_keeps_first_form() {
        assert_eq!(
            collapse_plurals(&kw(&["robot", "batteries", "robots", "news", "bus"])),
            kw(&["robot", "batteries", "news", "bus"])
        );
        assert_eq!(collapse_plurals(&kw(&["chips", "chip"])), kw(&["chips"]));
    }

    #[test]
    fn test_build_queries_topic_fallback_is_seeded() {
        let first = QueryTranslator::with_seed(42).build_queries(&kw(&["cohete"]), "un cohete", None);
        let second = QueryTranslator::with_seed(42).build_queries(&kw(&["cohete"]), "un cohete", None);
        assert_eq!(first.primary, "rocket");
        assert_eq!(first.alternatives, second.alternatives);
        assert_eq!(first.alternatives.len(), 1);

        // "rocket" equals the primary and is never offered
        let drawn = first.alternatives[0].as_str();
        assert!(drawn == "space exploration" || drawn == "satellite", "drew {}", drawn);
    }

    #[test]
    fn test_build_queries_without_keywords() {
        let translator = QueryTranslator::with_seed(5);
        let result = translator.build_queries(&[], "", None);
        assert!(!result.has_primary());
        assert_eq!(result.language, QueryLanguage::Source);
        // Default topic still offers something to search for
        assert_eq!(result.alternatives.len(), 1);
    }

    #[test]
    fn test_detect_topic_falls_back_to_default() {
        let translator = QueryTranslator::with_seed(0);
        let topic = translator.detect_topic("las acciones suben", &[]).map(|t| t.topic.as_str());
        assert_eq!(topic, Some("finance"));
        let topic = translator.detect_topic("nada que ver", &[]).map(|t| t.topic.as_str());
        assert_eq!(topic, Some("technology"));
    }

    #[test]
    fn test_simplify_keeps_two_terms() {
        let translator = QueryTranslator::with_seed(0);
        assert_eq!(translator.simplify("empresa mercado futuro"), "company market");
        assert_eq!(translator.simplify("robots robots nube"), "robots cloud");
        assert_eq!(translator.simplify(""), "");
    }
}
