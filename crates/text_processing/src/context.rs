//! Situational context detection
//!
//! Tags modifiers such as "agar ... kharab ho jaye" (conditional damage) or
//! "regular check". Pure lookup, not part of the numeric score.

use std::sync::Arc;

use qa_match_config::CompiledLexicon;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextMatch {
    pub name: String,
    pub modifier: String,
    /// Source text of the pattern that fired
    pub pattern: String,
}

pub struct ContextDetector {
    lexicon: Arc<CompiledLexicon>,
}

impl ContextDetector {
    pub fn new(lexicon: Arc<CompiledLexicon>) -> Self {
        Self { lexicon }
    }

    /// One match per context whose patterns fire, in lexicon order
    pub fn detect(&self, text: &str) -> Vec<ContextMatch> {
        let text = text.to_lowercase();
        self.lexicon
            .contexts()
            .iter()
            .filter_map(|context| {
                context
                    .patterns
                    .iter()
                    .find(|(_, re)| re.is_match(&text))
                    .map(|(source, _)| ContextMatch {
                        name: context.name.clone(),
                        modifier: context.modifier.clone(),
                        pattern: source.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_match_config::LexiconConfig;

    fn detector() -> ContextDetector {
        ContextDetector::new(Arc::new(LexiconConfig::builtin().compile().unwrap()))
    }

    fn modifiers(text: &str) -> Vec<String> {
        detector().detect(text).into_iter().map(|m| m.modifier).collect()
    }

    #[test]
    fn test_conditional_damage() {
        assert_eq!(
            modifiers("agar gasket kharab ho jaye to kya kare"),
            vec!["conditional-damage"]
        );
    }

    #[test]
    fn test_multiple_contexts() {
        let found = modifiers("installation ke baad regular inspection kaise kare");
        assert!(found.contains(&"after-installation".to_string()));
        assert!(found.contains(&"regular-check".to_string()));
    }

    #[test]
    fn test_first_time_and_operation() {
        assert_eq!(modifiers("pehli baar commissioning"), vec!["first-time-check"]);
        assert_eq!(
            modifiers("during operation tube leak"),
            vec!["during-operation"]
        );
    }

    #[test]
    fn test_no_context() {
        assert!(detector().detect("wps kya hai").is_empty());
    }

    #[test]
    fn test_pattern_reported() {
        let found = detector().detect("before installation check");
        assert_eq!(found[0].name, "before_installation");
        assert!(found[0].pattern.contains("before"));
    }
}
