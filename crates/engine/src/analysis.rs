//! Per-search analysis of the query and of each candidate
//!
//! Query variants are analyzed once per search, candidates once per search
//! (never per variant).

use qa_match_config::fold_text;
use qa_match_core::{CandidateRecord, ScriptDetection};
use qa_match_text_processing::{
    ContextMatch, EntityMatch, EntityResolver, IntentAnalysis, IntentClassifier, IntentMatch,
};
use serde::Serialize;

/// Entities and intents of one text (or one candidate)
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextAnalysis {
    pub entities: Vec<EntityMatch>,
    pub intents: IntentAnalysis,
}

impl TextAnalysis {
    pub fn top_entity(&self) -> Option<&EntityMatch> {
        self.entities.first()
    }

    pub fn primary_intent(&self) -> Option<&IntentMatch> {
        self.intents.primary()
    }
}

/// One query variant with its tokens and analysis
#[derive(Debug, Clone, Serialize)]
pub struct VariantAnalysis {
    pub text: String,
    pub tokens: Vec<String>,
    pub analysis: TextAnalysis,
}

impl VariantAnalysis {
    pub fn new(text: String, resolver: &EntityResolver, classifier: &IntentClassifier) -> Self {
        let tokens = fold_text(&text)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let analysis = TextAnalysis {
            entities: resolver.resolve(&text),
            intents: classifier.classify(&text),
        };
        Self {
            text,
            tokens,
            analysis,
        }
    }
}

/// Candidate-side data the scorer needs
#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub analysis: TextAnalysis,
    /// Combined English and Hindi keywords, lowercased
    pub keywords: Vec<String>,
    /// Individual keyword words longer than three characters
    pub keyword_words: Vec<String>,
}

impl CandidateProfile {
    pub fn new(
        candidate: &CandidateRecord,
        resolver: &EntityResolver,
        classifier: &IntentClassifier,
    ) -> Self {
        let keywords: Vec<String> = candidate
            .combined_keywords()
            .iter()
            .map(|k| fold_text(k))
            .filter(|k| !k.is_empty())
            .collect();

        let mut keyword_words: Vec<String> = Vec::new();
        for word in keywords.iter().flat_map(|k| k.split_whitespace()) {
            if word.chars().count() > 3 && !keyword_words.iter().any(|w| w == word) {
                keyword_words.push(word.to_string());
            }
        }

        let analysis = TextAnalysis {
            entities: resolver.resolve_many(candidate.comparable_texts()),
            intents: classifier.classify_many(candidate.comparable_texts()),
        };

        Self {
            analysis,
            keywords,
            keyword_words,
        }
    }
}

/// Diagnostic view of how a query was understood
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnalysis {
    pub raw: String,
    /// Lowercased, punctuation collapsed
    pub prepared: String,
    pub cleaned: String,
    /// Cleaned query first
    pub variants: Vec<VariantAnalysis>,
    pub contexts: Vec<ContextMatch>,
    pub script: ScriptDetection,
}

impl QueryAnalysis {
    /// Analysis of the cleaned query itself
    pub fn primary(&self) -> Option<&VariantAnalysis> {
        self.variants.first()
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_match_config::LexiconConfig;
    use qa_match_text_processing::EntityTier;
    use std::sync::Arc;

    fn stages() -> (EntityResolver, IntentClassifier) {
        let lexicon = Arc::new(LexiconConfig::builtin().compile().unwrap());
        (
            EntityResolver::new(lexicon.clone()),
            IntentClassifier::new(lexicon),
        )
    }

    #[test]
    fn test_variant_tokens_are_folded() {
        let (resolver, classifier) = stages();
        let variant = VariantAnalysis::new("wps ka matlab kya hai".into(), &resolver, &classifier);
        assert_eq!(variant.tokens, vec!["wps", "ka", "matlab", "kya", "hai"]);
        assert_eq!(variant.analysis.top_entity().unwrap().tier, EntityTier::Abbreviation);
        assert!(variant.analysis.primary_intent().is_some());
    }

    #[test]
    fn test_candidate_profile() {
        let (resolver, classifier) = stages();
        let record = CandidateRecord::new(
            "q1",
            "What is WPS?",
            "Welding procedure specification kya hoti hai?",
        )
        .with_keywords(&["WPS", "Welding Procedure Specification"], &["wps"]);

        let profile = CandidateProfile::new(&record, &resolver, &classifier);
        assert_eq!(profile.keywords, vec!["wps", "welding procedure specification"]);
        assert_eq!(profile.keyword_words, vec!["welding", "procedure", "specification"]);
        assert_eq!(
            profile.analysis.top_entity().unwrap().entity,
            "welding_procedure_specification"
        );
        assert_eq!(profile.analysis.top_entity().unwrap().tier, EntityTier::Exact);
    }

    #[test]
    fn test_empty_candidate_profile() {
        let (resolver, classifier) = stages();
        let record = CandidateRecord::new("q1", "", "");
        let profile = CandidateProfile::new(&record, &resolver, &classifier);
        assert!(profile.keywords.is_empty());
        assert!(profile.analysis.top_entity().is_none());
        assert!(profile.analysis.intents.is_empty());
    }
}
