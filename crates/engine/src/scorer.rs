//! Semantic scorer
//!
//! Fuses four signals for one (query variant, candidate) pair:
//!
//! | component | max | signal |
//! |---|---|---|
//! | entity | 40 | same top entity, else keyword coverage when a side has none |
//! | intent | 35 | same primary intent, else intent-name overlap (max 20) |
//! | expansion | 15 | best keyword coverage over all variants |
//! | fuzzy | 10 | query tokens within edit distance 2 of a keyword word |

use qa_match_core::ScoreBreakdown;
use qa_match_text_processing::levenshtein_distance;

use crate::analysis::{CandidateProfile, TextAnalysis, VariantAnalysis};

const ENTITY_MAX: f32 = 40.0;
const INTENT_MAX: f32 = 35.0;
const INTENT_OVERLAP_MAX: f32 = 20.0;
const EXPANSION_MAX: f32 = 15.0;
const FUZZY_MAX: f32 = 10.0;

/// Query tokens shorter than this are ignored by the fuzzy component
const FUZZY_MIN_TOKEN_CHARS: usize = 3;
const FUZZY_MAX_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticScorer;

impl SemanticScorer {
    pub fn new() -> Self {
        Self
    }

    /// Breakdown for one variant; `expansion` is computed once per candidate
    /// via [`Self::expansion_score`]
    pub fn score(
        &self,
        variant: &VariantAnalysis,
        expansion: f32,
        candidate: &CandidateProfile,
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            entity: self.entity_score(&variant.analysis, &variant.tokens, candidate),
            intent: self.intent_score(&variant.analysis, &candidate.analysis),
            expansion,
            fuzzy: self.fuzzy_score(&variant.tokens, candidate),
        }
    }

    pub fn entity_score(
        &self,
        query: &TextAnalysis,
        tokens: &[String],
        candidate: &CandidateProfile,
    ) -> f32 {
        match (query.top_entity(), candidate.analysis.top_entity()) {
            (Some(q), Some(c)) if q.entity == c.entity => {
                (q.confidence + c.confidence) / 2.0 / 100.0 * ENTITY_MAX
            }
            (Some(_), Some(_)) => 0.0,
            _ => keyword_coverage(tokens, &candidate.keywords) * ENTITY_MAX,
        }
    }

    pub fn intent_score(&self, query: &TextAnalysis, candidate: &TextAnalysis) -> f32 {
        if let (Some(q), Some(c)) = (query.primary_intent(), candidate.primary_intent()) {
            if q.intent == c.intent {
                return (q.confidence + c.confidence) / 2.0 / 100.0 * INTENT_MAX;
            }
        }

        let query_intents = query.intents.names();
        if query_intents.is_empty() {
            return 0.0;
        }
        let candidate_intents = candidate.intents.names();
        let overlap = query_intents
            .iter()
            .filter(|i| candidate_intents.contains(i))
            .count();

        overlap as f32 / query_intents.len() as f32 * INTENT_OVERLAP_MAX
    }

    /// Best keyword coverage over every variant, scaled to 15
    pub fn expansion_score(&self, variants: &[VariantAnalysis], candidate: &CandidateProfile) -> f32 {
        variants
            .iter()
            .map(|v| keyword_coverage(&v.tokens, &candidate.keywords))
            .fold(0.0_f32, f32::max)
            * EXPANSION_MAX
    }

    pub fn fuzzy_score(&self, tokens: &[String], candidate: &CandidateProfile) -> f32 {
        let eligible: Vec<&String> = tokens
            .iter()
            .filter(|t| t.chars().count() >= FUZZY_MIN_TOKEN_CHARS)
            .collect();
        if eligible.is_empty() || candidate.keyword_words.is_empty() {
            return 0.0;
        }

        let close = eligible
            .iter()
            .filter(|token| {
                candidate
                    .keyword_words
                    .iter()
                    .any(|word| within_distance(token, word))
            })
            .count();

        close as f32 / eligible.len() as f32 * FUZZY_MAX
    }
}

/// Fraction of tokens that are a substring of some keyword, or contain one
fn keyword_coverage(tokens: &[String], keywords: &[String]) -> f32 {
    if tokens.is_empty() || keywords.is_empty() {
        return 0.0;
    }
    let found = tokens
        .iter()
        .filter(|t| {
            keywords
                .iter()
                .any(|k| k.contains(t.as_str()) || t.contains(k.as_str()))
        })
        .count();
    found as f32 / tokens.len() as f32
}

fn within_distance(a: &str, b: &str) -> bool {
    let (la, lb) = (a.chars().count(), b.chars().count());
    la.abs_diff(lb) <= FUZZY_MAX_DISTANCE && levenshtein_distance(a, b) <= FUZZY_MAX_DISTANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_match_config::LexiconConfig;
    use qa_match_core::CandidateRecord;
    use qa_match_text_processing::{EntityResolver, IntentClassifier};
    use std::sync::Arc;

    struct Fixture {
        resolver: EntityResolver,
        classifier: IntentClassifier,
    }

    impl Fixture {
        fn new() -> Self {
            let lexicon = Arc::new(LexiconConfig::builtin().compile().unwrap());
            Self {
                resolver: EntityResolver::new(lexicon.clone()),
                classifier: IntentClassifier::new(lexicon),
            }
        }

        fn variant(&self, text: &str) -> VariantAnalysis {
            VariantAnalysis::new(text.to_string(), &self.resolver, &self.classifier)
        }

        fn profile(&self, record: &CandidateRecord) -> CandidateProfile {
            CandidateProfile::new(record, &self.resolver, &self.classifier)
        }
    }

    fn wps_record() -> CandidateRecord {
        CandidateRecord::new(
            "q1",
            "What is WPS (Welding Procedure Specification)?",
            "WPS ka matlab kya hota hai?",
        )
        .with_keywords(&["wps", "welding procedure specification", "welding"], &[])
    }

    #[test]
    fn test_same_entity_averages_confidence() {
        let f = Fixture::new();
        let variant = f.variant("wps ka matlab kya hai");
        let profile = f.profile(&wps_record());
        // query abbreviation 95, candidate exact 100
        let score = SemanticScorer.entity_score(&variant.analysis, &variant.tokens, &profile);
        assert!((score - 39.0).abs() < 0.01);
    }

    #[test]
    fn test_different_entities_score_zero() {
        let f = Fixture::new();
        let variant = f.variant("flange ka kaam");
        let profile = f.profile(&wps_record());
        assert_eq!(
            SemanticScorer.entity_score(&variant.analysis, &variant.tokens, &profile),
            0.0
        );
    }

    #[test]
    fn test_entity_falls_back_to_keywords() {
        let f = Fixture::new();
        let variant = f.variant("electrode storage");
        let record = CandidateRecord::new("q2", "How long can electrodes stay outside the oven?", "")
            .with_keywords(&["electrode", "storage"], &[]);
        let profile = f.profile(&record);
        assert!(variant.analysis.top_entity().is_none());
        // both tokens covered
        let score = SemanticScorer.entity_score(&variant.analysis, &variant.tokens, &profile);
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_same_intent() {
        let f = Fixture::new();
        let query = f.variant("wps ka matlab kya hai");
        let profile = f.profile(&wps_record());
        let score = SemanticScorer.intent_score(&query.analysis, &profile.analysis);
        assert!(score > 30.0 && score <= 35.0);
    }

    #[test]
    fn test_intent_overlap_without_primary_match() {
        let f = Fixture::new();
        let query = f.variant("leakage problem");
        let record = CandidateRecord::new("q3", "Gasket leakage problem during operation", "");
        let profile = f.profile(&record);
        // context-only query: no primary, full name overlap
        assert_eq!(
            SemanticScorer.intent_score(&query.analysis, &profile.analysis),
            20.0
        );
    }

    #[test]
    fn test_expansion_takes_best_variant() {
        let f = Fixture::new();
        let variants = vec![
            f.variant("wps ka matlab"),
            f.variant("welding procedure specification ka matlab"),
        ];
        let profile = f.profile(&wps_record());
        // second variant: 3 of 5 tokens covered
        let score = SemanticScorer.expansion_score(&variants, &profile);
        assert!((score - 9.0).abs() < 0.01);
    }

    #[test]
    fn test_fuzzy_ignores_short_tokens() {
        let f = Fixture::new();
        let variant = f.variant("weldng ka");
        let profile = f.profile(&wps_record());
        // only "weldng" is eligible and it is one edit from "welding"
        assert_eq!(SemanticScorer.fuzzy_score(&variant.tokens, &profile), 10.0);
    }

    #[test]
    fn test_empty_candidate_fields_contribute_nothing() {
        let f = Fixture::new();
        let variant = f.variant("porosity kya hai");
        let profile = f.profile(&CandidateRecord::new("q4", "", ""));
        let breakdown = SemanticScorer.score(&variant, 0.0, &profile);
        assert_eq!(breakdown.total(), 0.0);
    }

    #[test]
    fn test_total_is_bounded() {
        let f = Fixture::new();
        let variant = f.variant("welding procedure specification ka matlab kya hai");
        let profile = f.profile(&wps_record());
        let expansion = SemanticScorer.expansion_score(std::slice::from_ref(&variant), &profile);
        let total = SemanticScorer.score(&variant, expansion, &profile).total();
        assert!((0.0..=100.0).contains(&total));
        assert!(total > 70.0);
    }
}
