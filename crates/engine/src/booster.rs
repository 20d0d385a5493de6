//! Secondary boosts applied after the base score
//!
//! Small additive nudges from signals the scorer ignores: category words,
//! question length, script, tags and difficulty register. Boosts read the
//! raw query, since cleaning strips phrases like "in detail".

use std::sync::Arc;

use qa_match_config::{fold_text, BoostSettings, CompiledLexicon};
use qa_match_core::{CandidateRecord, Difficulty, ScriptDetection, ScriptDetector};

/// Register the query is phrased in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Register {
    Basic,
    Advanced,
    Neutral,
}

/// Query-side inputs, computed once per search
#[derive(Debug, Clone)]
pub struct BoostQuery {
    folded: String,
    padded: String,
    word_count: usize,
    non_english: bool,
}

impl BoostQuery {
    pub fn new(raw: &str, script: &ScriptDetection) -> Self {
        let folded = fold_text(raw);
        let padded = format!(" {} ", folded);
        let word_count = folded.split_whitespace().count();
        Self {
            folded,
            padded,
            word_count,
            non_english: script.is_non_english(),
        }
    }

    fn contains_word(&self, term: &str) -> bool {
        !term.is_empty() && self.padded.contains(&format!(" {} ", term))
    }
}

pub struct Booster {
    settings: BoostSettings,
    lexicon: Arc<CompiledLexicon>,
    detector: ScriptDetector,
}

impl Booster {
    pub fn new(settings: BoostSettings, lexicon: Arc<CompiledLexicon>) -> Self {
        Self {
            settings,
            lexicon,
            detector: ScriptDetector::new(),
        }
    }

    /// Total boost and the reasons that contributed
    pub fn boost(&self, query: &BoostQuery, candidate: &CandidateRecord) -> (f32, Vec<String>) {
        let s = &self.settings;
        let mut total = 0.0;
        let mut reasons = Vec::new();

        if let Some(category) = candidate.categories.iter().find(|c| {
            self.lexicon
                .category_keywords(c)
                .iter()
                .any(|k| query.contains_word(k))
        }) {
            total += s.category;
            reasons.push(format!("category:{}", category.to_lowercase()));
        }

        if let Some(count) = candidate.closest_question_word_count(query.word_count) {
            let diff = count.abs_diff(query.word_count);
            if diff <= s.close_word_gap {
                total += s.close_word_count;
                reasons.push("word_count:close".to_string());
            } else if diff <= s.near_word_gap {
                total += s.near_word_count;
                reasons.push("word_count:near".to_string());
            }
        }

        if query.non_english
            && self
                .detector
                .detect(&candidate.searchable_text())
                .is_non_english()
        {
            total += s.script;
            reasons.push("script".to_string());
        }

        if let Some(tag) = candidate
            .tags
            .iter()
            .map(|t| fold_text(t))
            .find(|t| !t.is_empty() && query.folded.contains(t.as_str()))
        {
            total += s.tag;
            reasons.push(format!("tag:{}", tag));
        }

        match (self.register(query), candidate.difficulty) {
            (Register::Basic, Difficulty::Easy) | (Register::Advanced, Difficulty::Hard) => {
                total += s.difficulty_match;
                reasons.push(format!("difficulty:{}", candidate.difficulty.as_str()));
            }
            (Register::Neutral, Difficulty::Medium) => {
                total += s.difficulty_neutral;
                reasons.push("difficulty:neutral".to_string());
            }
            _ => {}
        }

        (total, reasons)
    }

    fn register(&self, query: &BoostQuery) -> Register {
        let register = self.lexicon.difficulty();
        if register.basic_markers.iter().any(|m| query.contains_word(m)) {
            Register::Basic
        } else if register.advanced_markers.iter().any(|m| query.contains_word(m)) {
            Register::Advanced
        } else {
            Register::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_match_config::LexiconConfig;

    fn booster() -> Booster {
        Booster::new(
            BoostSettings::default(),
            Arc::new(LexiconConfig::builtin().compile().unwrap()),
        )
    }

    fn query(raw: &str) -> BoostQuery {
        BoostQuery::new(raw, &ScriptDetector::new().detect(raw))
    }

    #[test]
    fn test_all_boosts() {
        let record = CandidateRecord::new("q1", "What is WPS?", "WPS kya hai?")
            .with_categories(&["Welding"])
            .with_tags(&["wps"]);
        let (boost, reasons) = booster().boost(&query("WPS kya hai"), &record);
        // category 5, word count 3, script 2, tag 2, neutral+medium 1
        assert_eq!(boost, 13.0);
        assert!(reasons.contains(&"category:welding".to_string()));
        assert!(reasons.contains(&"script".to_string()));
        assert!(reasons.contains(&"tag:wps".to_string()));
        assert!(reasons.contains(&"difficulty:neutral".to_string()));
    }

    #[test]
    fn test_word_count_tiers() {
        let b = booster();
        let record = CandidateRecord::new("q1", "one two three four five six seven eight", "");
        let (_, reasons) = b.boost(&query("one two three four five six"), &record);
        assert!(reasons.contains(&"word_count:close".to_string()));
        let (_, reasons) = b.boost(&query("one two three"), &record);
        assert!(reasons.contains(&"word_count:near".to_string()));
        let (_, reasons) = b.boost(&query("one"), &record);
        assert!(!reasons.iter().any(|r| r.starts_with("word_count")));
    }

    #[test]
    fn test_difficulty_register() {
        let b = booster();
        let hard = CandidateRecord::new("q1", "", "").with_difficulty(Difficulty::Hard);
        let easy = CandidateRecord::new("q2", "", "").with_difficulty(Difficulty::Easy);

        let (boost, _) = b.boost(&query("pwht in detail"), &hard);
        assert_eq!(boost, 2.0);
        let (boost, _) = b.boost(&query("basic question on pwht"), &easy);
        assert_eq!(boost, 2.0);
        // register disagrees
        let (boost, _) = b.boost(&query("basic question on pwht"), &hard);
        assert_eq!(boost, 0.0);
    }

    #[test]
    fn test_english_query_gets_no_script_boost() {
        let record = CandidateRecord::new("q1", "", "WPS kya hai?").with_difficulty(Difficulty::Hard);
        let (_, reasons) = booster().boost(&query("what is wps"), &record);
        assert!(!reasons.contains(&"script".to_string()));
    }

    #[test]
    fn test_unknown_category_ignored() {
        let record = CandidateRecord::new("q1", "", "")
            .with_categories(&["finance"])
            .with_difficulty(Difficulty::Hard);
        let (boost, reasons) = booster().boost(&query("loan interest rate"), &record);
        assert_eq!(boost, 0.0);
        assert!(reasons.is_empty());
    }
}
