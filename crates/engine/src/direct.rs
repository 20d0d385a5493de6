//! Direct-match shortcut
//!
//! Compares the normalized query with every candidate's question and
//! normalized texts before the full pipeline runs:
//! - exact equality: 100
//! - equality once `Always` abbreviations are expanded on both sides: 95
//! - character similarity at or above the near-exact bar: similarity x 100,
//!   only when both texts carry the same abbreviation keys

use std::collections::HashSet;

use qa_match_core::CandidateRecord;
use qa_match_text_processing::{similarity, QueryExpander, QueryNormalizer};
use serde::Serialize;

const EXACT_CONFIDENCE: f32 = 100.0;
const ABBREVIATION_CONFIDENCE: f32 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectMatchType {
    Exact,
    Abbreviation,
    NearExact,
}

impl DirectMatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Abbreviation => "abbreviation",
            Self::NearExact => "near_exact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectMatch {
    pub candidate_index: usize,
    pub candidate_id: String,
    pub confidence: f32,
    pub match_type: DirectMatchType,
    /// Normalized candidate text that matched
    pub matched_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectMatchResult {
    pub success: bool,
    /// Best match per candidate, confidence descending
    pub matches: Vec<DirectMatch>,
}

impl DirectMatchResult {
    pub fn best(&self) -> Option<&DirectMatch> {
        self.matches.first()
    }
}

struct QueryForm<'a> {
    text: &'a str,
    expanded: String,
    rule_keys: HashSet<String>,
}

pub struct DirectMatcher {
    normalizer: QueryNormalizer,
    expander: QueryExpander,
    near_exact_similarity: f32,
}

impl DirectMatcher {
    pub fn new(
        normalizer: QueryNormalizer,
        expander: QueryExpander,
        near_exact_similarity: f32,
    ) -> Self {
        Self {
            normalizer,
            expander,
            near_exact_similarity,
        }
    }

    /// Match query forms (raw-normalized and cleaned) against all candidates
    pub fn find(&self, query_forms: &[&str], candidates: &[CandidateRecord]) -> DirectMatchResult {
        let queries: Vec<QueryForm<'_>> = query_forms
            .iter()
            .filter(|q| !q.is_empty())
            .map(|q| QueryForm {
                text: q,
                expanded: self.expander.expand_abbreviations(q),
                rule_keys: self.expander.rule_keys(q),
            })
            .collect();
        if queries.is_empty() {
            return DirectMatchResult::default();
        }

        let mut matches: Vec<DirectMatch> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| self.match_candidate(&queries, index, candidate))
            .collect();

        matches.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });

        DirectMatchResult {
            success: !matches.is_empty(),
            matches,
        }
    }

    fn match_candidate(
        &self,
        queries: &[QueryForm<'_>],
        index: usize,
        candidate: &CandidateRecord,
    ) -> Option<DirectMatch> {
        let mut best: Option<(f32, DirectMatchType, String)> = None;

        for text in candidate.comparable_texts() {
            let text = self.normalizer.prepare(text);
            if text.is_empty() {
                continue;
            }
            let expanded = self.expander.expand_abbreviations(&text);

            let mut rule_keys: Option<HashSet<String>> = None;

            for query in queries {
                let hit = if query.text == text {
                    Some((EXACT_CONFIDENCE, DirectMatchType::Exact))
                } else if query.expanded == expanded {
                    Some((ABBREVIATION_CONFIDENCE, DirectMatchType::Abbreviation))
                } else {
                    let sim = similarity(query.text, &text);
                    // "what is ut" and "what is rt" are one edit apart
                    let same_terms = sim >= self.near_exact_similarity
                        && *rule_keys.get_or_insert_with(|| self.expander.rule_keys(&text))
                            == query.rule_keys;
                    same_terms.then(|| (sim * 100.0, DirectMatchType::NearExact))
                };

                if let Some((confidence, match_type)) = hit {
                    if best.as_ref().map_or(true, |(c, _, _)| confidence > *c) {
                        best = Some((confidence, match_type, text.clone()));
                    }
                }
            }
        }

        best.map(|(confidence, match_type, matched_text)| DirectMatch {
            candidate_index: index,
            candidate_id: candidate.id.clone(),
            confidence,
            match_type,
            matched_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_match_config::{LexiconConfig, NormalizerSettings};
    use std::sync::Arc;

    fn matcher() -> DirectMatcher {
        let lexicon = Arc::new(LexiconConfig::builtin().compile().unwrap());
        let settings = NormalizerSettings::default();
        DirectMatcher::new(
            QueryNormalizer::new(&settings).unwrap(),
            QueryExpander::new(lexicon, &settings),
            0.90,
        )
    }

    fn records() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::new("q1", "What is WPS?", "WPS kya hai?"),
            CandidateRecord::new(
                "q2",
                "What is a procedure qualification record?",
                "Procedure qualification record kya hai?",
            ),
            CandidateRecord::new("q3", "How does a heat exchanger work?", ""),
        ]
    }

    #[test]
    fn test_exact() {
        let result = matcher().find(&["wps kya hai"], &records());
        assert!(result.success);
        let best = result.best().unwrap();
        assert_eq!(best.candidate_id, "q1");
        assert_eq!(best.match_type, DirectMatchType::Exact);
        assert_eq!(best.confidence, 100.0);
    }

    #[test]
    fn test_abbreviation() {
        let result = matcher().find(&["pqr kya hai"], &records());
        let best = result.best().unwrap();
        assert_eq!(best.candidate_id, "q2");
        assert_eq!(best.match_type, DirectMatchType::Abbreviation);
        assert_eq!(best.confidence, 95.0);
    }

    #[test]
    fn test_near_exact() {
        let result = matcher().find(&["how does a heat exchanger works"], &records());
        let best = result.best().unwrap();
        assert_eq!(best.candidate_id, "q3");
        assert_eq!(best.match_type, DirectMatchType::NearExact);
        assert!(best.confidence >= 90.0 && best.confidence < 100.0);
    }

    #[test]
    fn test_no_match() {
        let result = matcher().find(&["gasket leakage kyon hota hai"], &records());
        assert!(!result.success);
        assert!(result.matches.is_empty());
        assert!(!matcher().find(&[""], &records()).success);
    }

    #[test]
    fn test_sorted_descending() {
        let records = vec![
            CandidateRecord::new("b", "wps kya hai", ""),
            CandidateRecord::new("a", "wps kya hain", ""),
        ];
        let result = matcher().find(&["wps kya hai"], &records);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].candidate_id, "b");
        assert!(result.matches[0].confidence > result.matches[1].confidence);
    }

    #[test]
    fn test_near_exact_rejects_other_abbreviation() {
        let records = vec![
            CandidateRecord::new("kb-rt", "What is RT?", ""),
            CandidateRecord::new("kb-ut", "What is ultrasonic testing and how is it done", ""),
        ];
        let result = matcher().find(&["what is ut"], &records);
        assert!(!result.success);

        // Same abbreviation on both sides still passes
        let records = vec![CandidateRecord::new("kb-ut", "What is UT?", "")];
        let result = matcher().find(&["whats is ut"], &records);
        assert!(result.success);
    }
}
