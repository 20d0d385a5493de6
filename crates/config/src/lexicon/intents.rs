//! Question intent categories and their pattern entries

use serde::{Deserialize, Serialize};

use super::entities::to_strings;

/// What kind of answer a question is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionIntent {
    Definition,
    Working,
    Procedure,
    Repair,
    Problem,
    Identification,
    /// Acceptance / reject decisions
    Decision,
    Comparison,
    Application,
    Types,
    Causes,
    Safety,
}

impl QuestionIntent {
    pub const ALL: [QuestionIntent; 12] = [
        Self::Definition,
        Self::Working,
        Self::Procedure,
        Self::Repair,
        Self::Problem,
        Self::Identification,
        Self::Decision,
        Self::Comparison,
        Self::Application,
        Self::Types,
        Self::Causes,
        Self::Safety,
    ];

    /// Context intents describe the situation and are never primary
    pub fn is_context(&self) -> bool {
        matches!(self, Self::Problem | Self::Causes)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Definition => "DEFINITION",
            Self::Working => "WORKING",
            Self::Procedure => "PROCEDURE",
            Self::Repair => "REPAIR",
            Self::Problem => "PROBLEM",
            Self::Identification => "IDENTIFICATION",
            Self::Decision => "DECISION",
            Self::Comparison => "COMPARISON",
            Self::Application => "APPLICATION",
            Self::Types => "TYPES",
            Self::Causes => "CAUSES",
            Self::Safety => "SAFETY",
        }
    }
}

impl std::fmt::Display for QuestionIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regex patterns for one intent
///
/// Declaration order in the lexicon is the tie-break order for the primary
/// intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPatternEntry {
    pub intent: QuestionIntent,
    #[serde(default)]
    pub strong: Vec<String>,
    #[serde(default)]
    pub weak: Vec<String>,
    /// Supporting clues, each worth a fixed bonus
    #[serde(default)]
    pub clues: Vec<String>,
    /// Multiplier on the normalized score, in (0, 2]
    #[serde(default = "default_base_weight")]
    pub base_weight: f32,
}

fn default_base_weight() -> f32 {
    1.0
}

impl IntentPatternEntry {
    pub fn new(intent: QuestionIntent, strong: &[&str], weak: &[&str], clues: &[&str]) -> Self {
        Self {
            intent,
            strong: to_strings(strong),
            weak: to_strings(weak),
            clues: to_strings(clues),
            base_weight: default_base_weight(),
        }
    }

    pub fn all_patterns(&self) -> impl Iterator<Item = &String> {
        self.strong.iter().chain(&self.weak).chain(&self.clues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_intents() {
        let context: Vec<_> = QuestionIntent::ALL
            .iter()
            .filter(|i| i.is_context())
            .collect();
        assert_eq!(context, vec![&QuestionIntent::Problem, &QuestionIntent::Causes]);
    }

    #[test]
    fn test_intent_serde_name() {
        let json = serde_yaml::to_string(&QuestionIntent::Decision).unwrap();
        assert_eq!(json.trim(), "DECISION");
        let parsed: IntentPatternEntry =
            serde_yaml::from_str("intent: WORKING\nstrong: ['\\bworking\\b']").unwrap();
        assert_eq!(parsed.intent, QuestionIntent::Working);
        assert_eq!(parsed.base_weight, 1.0);
        assert!(parsed.weak.is_empty());
    }
}
