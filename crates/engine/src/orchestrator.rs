//! Question matcher
//!
//! Runs the direct-match shortcut first and falls back to the full pipeline:
//! clean, expand, analyze every variant once, score every candidate against
//! every variant, boost, rank, then filter with the adaptive threshold.
//! Degenerate input yields a no-match outcome, never an error.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use qa_match_config::{CompiledLexicon, LexiconConfig, Settings};
use qa_match_core::{
    CandidateRecord, KnowledgeStore, MatchEvent, MatchObserver, MatchOutcome, MatchResult,
    MatchStage, NoMatchReason, ScoredCandidate, ScriptDetector, SearchStats,
};
use qa_match_text_processing::{
    ContextDetector, EntityResolver, IntentClassifier, QueryExpander, QueryNormalizer,
};

use crate::analysis::{CandidateProfile, QueryAnalysis, VariantAnalysis};
use crate::booster::{BoostQuery, Booster};
use crate::direct::{DirectMatchResult, DirectMatcher};
use crate::observers::TracingObserver;
use crate::scorer::SemanticScorer;
use crate::threshold::AdaptiveThreshold;
use crate::EngineError;

pub struct QuestionMatcher {
    settings: Settings,
    lexicon: Arc<CompiledLexicon>,
    normalizer: QueryNormalizer,
    expander: QueryExpander,
    resolver: EntityResolver,
    classifier: IntentClassifier,
    contexts: ContextDetector,
    scorer: SemanticScorer,
    threshold: AdaptiveThreshold,
    booster: Booster,
    direct: DirectMatcher,
    script: ScriptDetector,
    observer: Arc<dyn MatchObserver>,
}

impl QuestionMatcher {
    /// Build from settings, loading the lexicon from `lexicon_path` or the
    /// built-in tables
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        let lexicon = LexiconConfig::load_or_builtin(settings.lexicon_path.as_deref())?;
        Self::with_lexicon(settings, Arc::new(lexicon.compile()?))
    }

    pub fn with_lexicon(
        settings: Settings,
        lexicon: Arc<CompiledLexicon>,
    ) -> Result<Self, EngineError> {
        settings.validate()?;

        let normalizer = QueryNormalizer::new(&settings.normalizer)?;
        let expander = QueryExpander::new(lexicon.clone(), &settings.normalizer);
        let direct = DirectMatcher::new(
            normalizer.clone(),
            expander.clone(),
            settings.engine.near_exact_similarity,
        );

        tracing::info!(
            entities = lexicon.entities().len(),
            intents = lexicon.intents().len(),
            contexts = lexicon.contexts().len(),
            "Question matcher ready"
        );

        Ok(Self {
            resolver: EntityResolver::new(lexicon.clone()),
            classifier: IntentClassifier::new(lexicon.clone()),
            contexts: ContextDetector::new(lexicon.clone()),
            scorer: SemanticScorer::new(),
            threshold: AdaptiveThreshold::new(settings.scoring.threshold.clone()),
            booster: Booster::new(settings.scoring.boost.clone(), lexicon.clone()),
            script: ScriptDetector::new(),
            observer: Arc::new(TracingObserver),
            normalizer,
            expander,
            direct,
            lexicon,
            settings,
        })
    }

    /// Replace the default tracing observer
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn lexicon(&self) -> &Arc<CompiledLexicon> {
        &self.lexicon
    }

    /// How the matcher understands `query`, without scoring anything
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let prepared = self.normalizer.prepare(query);
        let cleaned = self.normalizer.clean(query);
        let variants = if cleaned.is_empty() {
            Vec::new()
        } else {
            self.expander
                .expand(&cleaned)
                .into_iter()
                .map(|v| VariantAnalysis::new(v, &self.resolver, &self.classifier))
                .collect()
        };

        QueryAnalysis {
            raw: query.to_string(),
            contexts: self.contexts.detect(&prepared),
            script: self.script.detect(query),
            prepared,
            cleaned,
            variants,
        }
    }

    /// Direct-match shortcut on its own
    pub fn direct_match(&self, query: &str, candidates: &[CandidateRecord]) -> DirectMatchResult {
        let prepared = self.normalizer.prepare(query);
        let cleaned = self.normalizer.clean(query);
        self.direct.find(&query_forms(&prepared, &cleaned), candidates)
    }

    /// Match `query` against a candidate snapshot
    pub fn match_query(&self, query: &str, candidates: &[CandidateRecord]) -> MatchOutcome {
        let start = Instant::now();

        if query.trim().is_empty() {
            return self.no_match(NoMatchReason::EmptyQuery, 0, 0, start);
        }
        if candidates.is_empty() {
            return self.no_match(NoMatchReason::NoCandidates, 0, 0, start);
        }

        let analysis = self.analyze(query);

        let direct = self
            .direct
            .find(&query_forms(&analysis.prepared, &analysis.cleaned), candidates);
        if let Some(outcome) = self.direct_outcome(&direct, candidates, start) {
            return outcome;
        }

        if analysis.is_empty() {
            return self.no_match(NoMatchReason::EmptyQuery, 0, 0, start);
        }

        self.observer.on_event(&MatchEvent::QueryNormalized {
            raw: query,
            cleaned: &analysis.cleaned,
            variants: analysis.variants.len(),
        });

        let boost_query = BoostQuery::new(query, &analysis.script);
        let mut results = self.score_all(&analysis.variants, &boost_query, candidates);

        for result in &results {
            self.observer.on_event(&MatchEvent::CandidateScored {
                candidate_id: &result.candidate_id,
                base_score: result.base_score,
                total_score: result.total_score,
            });
        }

        results.sort_by(|a, b| {
            b.total_score
                .total_cmp(&a.total_score)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });

        let scores: Vec<f32> = results.iter().map(|r| r.total_score).collect();
        let decision = self.threshold.compute(&scores);
        self.observer.on_event(&MatchEvent::ThresholdComputed {
            gap: decision.gap,
            threshold: decision.threshold,
        });

        let variants = analysis.variants.len();
        let best_score = scores.first().copied().unwrap_or(0.0);
        let mut qualified = results
            .into_iter()
            .filter(|r| r.total_score >= decision.threshold)
            .map(|result| ScoredCandidate {
                candidate: candidates[result.candidate_index].clone(),
                result,
            });

        let Some(top) = qualified.next() else {
            return self.no_match(
                NoMatchReason::BelowThreshold {
                    best_score,
                    threshold: decision.threshold,
                },
                candidates.len(),
                variants,
                start,
            );
        };
        let alternates: Vec<ScoredCandidate> =
            qualified.take(self.settings.engine.max_alternates).collect();

        let stats = stats(candidates.len(), variants, start);
        self.observer.on_event(&MatchEvent::Completed {
            stage: Some(MatchStage::Pipeline),
            top_score: Some(top.result.total_score),
            candidates_scored: stats.candidates_scored,
            elapsed_us: stats.elapsed_us,
        });

        MatchOutcome::matched(top, alternates, MatchStage::Pipeline, decision.threshold, stats)
    }

    /// Snapshot the store, then match
    pub async fn match_from_store(
        &self,
        store: &dyn KnowledgeStore,
        query: &str,
    ) -> qa_match_core::Result<MatchOutcome> {
        let candidates = store.snapshot().await?;
        tracing::debug!(store = store.name(), candidates = candidates.len(), "Snapshot loaded");
        Ok(self.match_query(query, &candidates))
    }

    fn direct_outcome(
        &self,
        direct: &DirectMatchResult,
        candidates: &[CandidateRecord],
        start: Instant,
    ) -> Option<MatchOutcome> {
        let gate = self.settings.engine.direct_match_min_confidence;
        let best = direct.best().filter(|m| m.confidence >= gate)?;

        self.observer.on_event(&MatchEvent::DirectHit {
            candidate_id: &best.candidate_id,
            confidence: best.confidence,
            match_type: best.match_type.as_str(),
        });

        let mut hits = direct
            .matches
            .iter()
            .filter(|m| m.confidence >= gate)
            .map(|m| ScoredCandidate {
                candidate: candidates[m.candidate_index].clone(),
                result: MatchResult::direct(
                    m.candidate_id.clone(),
                    m.candidate_index,
                    m.confidence,
                    m.match_type.as_str(),
                    m.matched_text.clone(),
                ),
            });

        let top = hits.next()?;
        let alternates: Vec<ScoredCandidate> =
            hits.take(self.settings.engine.max_alternates).collect();

        let stats = stats(candidates.len(), 1, start);
        self.observer.on_event(&MatchEvent::Completed {
            stage: Some(MatchStage::Direct),
            top_score: Some(top.result.total_score),
            candidates_scored: stats.candidates_scored,
            elapsed_us: stats.elapsed_us,
        });

        Some(MatchOutcome::matched(top, alternates, MatchStage::Direct, gate, stats))
    }

    fn score_all(
        &self,
        variants: &[VariantAnalysis],
        query: &BoostQuery,
        candidates: &[CandidateRecord],
    ) -> Vec<MatchResult> {
        if candidates.len() >= self.settings.engine.parallel_min_candidates {
            candidates
                .par_iter()
                .enumerate()
                .filter_map(|(index, candidate)| self.score_candidate(variants, query, index, candidate))
                .collect()
        } else {
            candidates
                .iter()
                .enumerate()
                .filter_map(|(index, candidate)| self.score_candidate(variants, query, index, candidate))
                .collect()
        }
    }

    /// Best variant by base score, then boosted
    fn score_candidate(
        &self,
        variants: &[VariantAnalysis],
        query: &BoostQuery,
        index: usize,
        candidate: &CandidateRecord,
    ) -> Option<MatchResult> {
        let profile = CandidateProfile::new(candidate, &self.resolver, &self.classifier);
        let expansion = self.scorer.expansion_score(variants, &profile);

        let mut best: Option<MatchResult> = None;
        for variant in variants {
            let breakdown = self.scorer.score(variant, expansion, &profile);
            // Strictly greater: earlier variants win ties
            if best
                .as_ref()
                .map_or(true, |b| breakdown.total() > b.base_score)
            {
                best = Some(MatchResult::new(
                    candidate.id.clone(),
                    index,
                    breakdown,
                    variant.text.clone(),
                ));
            }
        }

        let (boost, reasons) = self.booster.boost(query, candidate);
        best.map(|result| result.boosted(boost, reasons))
    }

    fn no_match(
        &self,
        reason: NoMatchReason,
        candidates_scored: usize,
        variants: usize,
        start: Instant,
    ) -> MatchOutcome {
        let stats = stats(candidates_scored, variants, start);
        self.observer.on_event(&MatchEvent::NoMatch { reason: &reason });
        self.observer.on_event(&MatchEvent::Completed {
            stage: None,
            top_score: match &reason {
                NoMatchReason::BelowThreshold { best_score, .. } => Some(*best_score),
                _ => None,
            },
            candidates_scored: stats.candidates_scored,
            elapsed_us: stats.elapsed_us,
        });
        MatchOutcome::no_match(reason, stats)
    }
}

/// Distinct, non-empty query forms for the direct matcher
fn query_forms<'a>(prepared: &'a str, cleaned: &'a str) -> Vec<&'a str> {
    let mut forms = vec![prepared];
    if cleaned != prepared {
        forms.push(cleaned);
    }
    forms.retain(|f| !f.is_empty());
    forms
}

fn stats(candidates_scored: usize, variants: usize, start: Instant) -> SearchStats {
    SearchStats {
        candidates_scored,
        variants,
        elapsed_us: start.elapsed().as_micros() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use qa_match_config::EngineSettings;

    /// Collects event names for assertions
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl MatchObserver for Recorder {
        fn on_event(&self, event: &MatchEvent<'_>) {
            let name = match event {
                MatchEvent::QueryNormalized { .. } => "normalized",
                MatchEvent::DirectHit { .. } => "direct",
                MatchEvent::CandidateScored { .. } => "scored",
                MatchEvent::ThresholdComputed { .. } => "threshold",
                MatchEvent::Completed { .. } => "completed",
                MatchEvent::NoMatch { .. } => "no_match",
            };
            self.events.lock().push(name.to_string());
        }
    }

    fn matcher() -> QuestionMatcher {
        QuestionMatcher::new(Settings::default()).unwrap()
    }

    fn records() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::new("q1", "What is WPS?", "WPS kya hai?")
                .with_keywords(&["wps", "welding procedure specification"], &[]),
            CandidateRecord::new("q2", "How does a flange gasket seal?", "")
                .with_keywords(&["flange", "gasket"], &[]),
        ]
    }

    #[test]
    fn test_empty_query() {
        let outcome = matcher().match_query("   ", &records());
        assert!(!outcome.is_success());
        assert_eq!(outcome.stats().candidates_scored, 0);
    }

    #[test]
    fn test_no_candidates() {
        let outcome = matcher().match_query("wps kya hai", &[]);
        match outcome {
            MatchOutcome::NoMatch { reason, .. } => assert_eq!(reason, NoMatchReason::NoCandidates),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_noise_only_query() {
        let outcome = matcher().match_query("??? !!", &records());
        assert!(!outcome.is_success());
        assert_eq!(outcome.stats().candidates_scored, 0);
    }

    #[test]
    fn test_direct_stage() {
        let recorder = Arc::new(Recorder::default());
        let matcher = matcher().with_observer(recorder.clone());
        let outcome = matcher.match_query("Tum mujhe batao ki WPS kya hai?", &records());

        match &outcome {
            MatchOutcome::Matched { stage, top_match, .. } => {
                assert_eq!(*stage, MatchStage::Direct);
                assert_eq!(top_match.candidate.id, "q1");
                assert_eq!(top_match.result.total_score, 100.0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        let events = recorder.events.lock();
        assert_eq!(events.as_slice(), ["direct", "completed"]);
    }

    #[test]
    fn test_pipeline_events() {
        let recorder = Arc::new(Recorder::default());
        let matcher = matcher().with_observer(recorder.clone());
        matcher.match_query("flange gasket leakage kyon hota hai", &records());

        let events = recorder.events.lock();
        assert_eq!(events.first().map(String::as_str), Some("normalized"));
        assert_eq!(events.iter().filter(|e| *e == "scored").count(), 2);
        assert!(events.contains(&"threshold".to_string()));
        assert_eq!(events.last().map(String::as_str), Some("completed"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let query = "flange gasket kaise seal karta hai";
        let sequential = matcher().match_query(query, &records());

        let mut settings = Settings::default();
        settings.engine = EngineSettings {
            parallel_min_candidates: 1,
            ..Default::default()
        };
        let parallel = QuestionMatcher::new(settings)
            .unwrap()
            .match_query(query, &records());

        assert_eq!(sequential.is_success(), parallel.is_success());
        assert_eq!(
            sequential.top_match().map(|t| t.result.total_score),
            parallel.top_match().map(|t| t.result.total_score)
        );
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.engine.near_exact_similarity = 1.5;
        assert!(matches!(
            QuestionMatcher::new(settings),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_analyze() {
        let analysis = matcher().analyze("Agar gasket kharab ho jaye to kya kare?");
        assert!(!analysis.cleaned.is_empty());
        assert_eq!(analysis.variants[0].text, analysis.cleaned);
        assert!(analysis
            .contexts
            .iter()
            .any(|c| c.modifier == "conditional-damage"));
        assert!(analysis.script.is_non_english());
    }
}
