//! Immutable, pre-processed lexicon shared by every matcher stage

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::contexts::DifficultyRegister;
use super::entities::ExpansionRule;
use super::intents::QuestionIntent;
use crate::ConfigError;

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\p{M}]+").expect("valid non-word pattern"));

/// Lowercase and reduce everything but letters, digits and marks to single
/// spaces
pub fn fold_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_WORD.replace_all(&lowered, " ").trim().to_string()
}

/// Partial term after folding
#[derive(Debug, Clone)]
pub struct CompiledPartial {
    pub term: String,
    pub strong: bool,
}

/// Entity entry with every term folded
#[derive(Debug, Clone)]
pub struct CompiledEntity {
    pub key: String,
    pub core_terms: Vec<String>,
    pub abbreviations: Vec<String>,
    pub typos: Vec<String>,
    pub related: Vec<String>,
    pub partials: Vec<CompiledPartial>,
    /// Words of the core terms longer than three characters
    pub core_words: Vec<String>,
}

/// Intent entry with compiled patterns
#[derive(Debug, Clone)]
pub struct CompiledIntent {
    pub intent: QuestionIntent,
    pub strong: Vec<Regex>,
    pub weak: Vec<Regex>,
    pub clues: Vec<Regex>,
    pub base_weight: f32,
}

/// Context entry with compiled patterns, each kept with its source text
#[derive(Debug, Clone)]
pub struct CompiledContext {
    pub name: String,
    pub modifier: String,
    pub patterns: Vec<(String, Regex)>,
}

/// Lexicon ready for matching
///
/// Built once by `LexiconConfig::compile` and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    pub(crate) entities: Vec<CompiledEntity>,
    pub(crate) intents: Vec<CompiledIntent>,
    pub(crate) contexts: Vec<CompiledContext>,
    pub(crate) expansion_rules: HashMap<String, ExpansionRule>,
    pub(crate) intent_keywords: HashMap<String, Vec<String>>,
    pub(crate) category_keywords: HashMap<String, Vec<String>>,
    pub(crate) difficulty: DifficultyRegister,
    pub(crate) fuzzy_excluded_words: HashSet<String>,
}

impl CompiledLexicon {
    /// Entities sorted by key
    pub fn entities(&self) -> &[CompiledEntity] {
        &self.entities
    }

    pub fn entity(&self, key: &str) -> Option<&CompiledEntity> {
        self.entities.iter().find(|e| e.key == key)
    }

    /// Intents in declaration order
    pub fn intents(&self) -> &[CompiledIntent] {
        &self.intents
    }

    pub fn contexts(&self) -> &[CompiledContext] {
        &self.contexts
    }

    pub fn expansion_rules(&self) -> &HashMap<String, ExpansionRule> {
        &self.expansion_rules
    }

    pub fn rule_for(&self, word: &str) -> Option<&ExpansionRule> {
        self.expansion_rules.get(word)
    }

    pub fn intent_keywords(&self) -> &HashMap<String, Vec<String>> {
        &self.intent_keywords
    }

    /// Keyword set of one category label; empty for unknown categories
    pub fn category_keywords(&self, category: &str) -> &[String] {
        self.category_keywords
            .get(&category.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn difficulty(&self) -> &DifficultyRegister {
        &self.difficulty
    }

    /// True for folded words the fuzzy entity tier must skip
    pub fn is_fuzzy_excluded(&self, word: &str) -> bool {
        self.fuzzy_excluded_words.contains(word)
    }
}

pub(crate) fn compile_pattern(source_name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
}

pub(crate) fn compile_patterns(
    source_name: &str,
    patterns: &[String],
) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|p| compile_pattern(source_name, p))
        .collect()
}

pub(crate) fn fold_all(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| fold_text(t))
        .filter(|t| !t.is_empty())
        .collect()
}

pub(crate) fn core_words(core_terms: &[String]) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for term in core_terms {
        for word in term.split_whitespace() {
            if word.chars().count() > 3 && !words.iter().any(|w| w == word) {
                words.push(word.to_string());
            }
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_text() {
        assert_eq!(fold_text("  X-Ray, Testing?? "), "x ray testing");
        assert_eq!(fold_text("हीट एक्सचेंजर!"), "हीट एक्सचेंजर");
        assert_eq!(fold_text("!!!"), "");
    }

    #[test]
    fn test_core_words() {
        let words = core_words(&["heat exchanger".to_string(), "hx unit".to_string()]);
        assert_eq!(words, vec!["heat", "exchanger", "unit"]);
    }

    #[test]
    fn test_bad_pattern() {
        let err = compile_pattern("intents.DEFINITION", r"(unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
