//! Entity semantic entries and expansion rules
//!
//! An entity entry lists every way a domain concept shows up in a question,
//! grouped by priority tier. Expansion rules describe how a recognized word
//! turns into query variants.

use serde::{Deserialize, Serialize};

/// Canonical domain entity with its tiered term lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitySemanticEntry {
    /// Highest priority terms; the first one is the canonical phrase
    pub core_terms: Vec<String>,
    /// Abbreviations matched as whole words
    #[serde(default)]
    pub abbreviations: Vec<String>,
    /// Known misspellings matched as substrings
    #[serde(default)]
    pub typos: Vec<String>,
    /// Loosely related terms
    #[serde(default)]
    pub related: Vec<String>,
    /// Fragments that hint at the entity on their own
    #[serde(default)]
    pub partials: Vec<PartialTerm>,
}

impl EntitySemanticEntry {
    pub fn new(core_terms: &[&str]) -> Self {
        Self {
            core_terms: to_strings(core_terms),
            ..Default::default()
        }
    }

    pub fn with_abbreviations(mut self, terms: &[&str]) -> Self {
        self.abbreviations = to_strings(terms);
        self
    }

    pub fn with_typos(mut self, terms: &[&str]) -> Self {
        self.typos = to_strings(terms);
        self
    }

    pub fn with_related(mut self, terms: &[&str]) -> Self {
        self.related = to_strings(terms);
        self
    }

    pub fn with_partial(mut self, partial: PartialTerm) -> Self {
        self.partials.push(partial);
        self
    }

    /// Canonical phrase used when an abbreviation is expanded
    pub fn canonical(&self) -> Option<&str> {
        self.core_terms.first().map(String::as_str)
    }

    /// Every term with the tier it belongs to
    pub fn tiered_terms(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.core_terms
            .iter()
            .map(|t| ("core_terms", t.as_str()))
            .chain(self.abbreviations.iter().map(|t| ("abbreviations", t.as_str())))
            .chain(self.typos.iter().map(|t| ("typos", t.as_str())))
            .chain(self.related.iter().map(|t| ("related", t.as_str())))
            .chain(self.partials.iter().map(|p| ("partials", p.term.as_str())))
    }
}

/// Partial term: a fragment of an entity name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialTerm {
    pub term: String,
    /// A strong partial is enough on its own for a 60-point hit
    #[serde(default)]
    pub strong: bool,
    /// How the fragment expands in query variants
    #[serde(default)]
    pub rule: ExpansionRule,
}

impl PartialTerm {
    pub fn weak(term: &str) -> Self {
        Self {
            term: term.to_string(),
            strong: false,
            rule: ExpansionRule::Never,
        }
    }

    pub fn strong(term: &str) -> Self {
        Self {
            strong: true,
            ..Self::weak(term)
        }
    }

    pub fn with_rule(mut self, rule: ExpansionRule) -> Self {
        self.rule = rule;
        self
    }
}

/// Expansion rule for one recognized word
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpansionRule {
    /// Substitute every listed expansion unconditionally
    Always { expansions: Vec<String> },
    /// Never expand
    #[default]
    Never,
    /// Expand only when a qualifying word is an immediate neighbour;
    /// both tokens are replaced by the qualifier's phrase
    CheckAdjacent { qualifiers: Vec<AdjacentQualifier> },
    /// Expand only when a disambiguating word occurs elsewhere in the text
    CheckContext { alternatives: Vec<ContextualExpansion> },
}

impl ExpansionRule {
    pub fn always(expansions: &[&str]) -> Self {
        Self::Always {
            expansions: to_strings(expansions),
        }
    }

    pub fn adjacent(qualifiers: &[(&str, &str)]) -> Self {
        Self::CheckAdjacent {
            qualifiers: qualifiers
                .iter()
                .map(|(word, phrase)| AdjacentQualifier {
                    word: word.to_string(),
                    phrase: phrase.to_string(),
                })
                .collect(),
        }
    }

    pub fn context(alternatives: &[(&[&str], &str)]) -> Self {
        Self::CheckContext {
            alternatives: alternatives
                .iter()
                .map(|(words, expansion)| ContextualExpansion {
                    context_words: to_strings(words),
                    expansion: expansion.to_string(),
                })
                .collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Always { .. } => "ALWAYS",
            Self::Never => "NEVER",
            Self::CheckAdjacent { .. } => "CHECK_ADJACENT",
            Self::CheckContext { .. } => "CHECK_CONTEXT",
        }
    }

    /// True when the rule carries nothing to expand into
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Always { expansions } => expansions.is_empty(),
            Self::Never => false,
            Self::CheckAdjacent { qualifiers } => qualifiers.is_empty(),
            Self::CheckContext { alternatives } => alternatives.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacentQualifier {
    pub word: String,
    pub phrase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualExpansion {
    pub context_words: Vec<String>,
    pub expansion: String,
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_yaml_shape() {
        let yaml = r#"
rule: CHECK_ADJACENT
qualifiers:
  - word: bundle
    phrase: tube bundle
"#;
        let rule: ExpansionRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule, ExpansionRule::adjacent(&[("bundle", "tube bundle")]));

        let never: ExpansionRule = serde_yaml::from_str("rule: NEVER").unwrap();
        assert_eq!(never, ExpansionRule::Never);
    }

    #[test]
    fn test_tiered_terms() {
        let entry = EntitySemanticEntry::new(&["welding procedure specification"])
            .with_abbreviations(&["wps"])
            .with_partial(PartialTerm::weak("specification"));
        let tiers: Vec<_> = entry.tiered_terms().map(|(tier, _)| tier).collect();
        assert_eq!(tiers, vec!["core_terms", "abbreviations", "partials"]);
        assert_eq!(entry.canonical(), Some("welding procedure specification"));
    }

    #[test]
    fn test_empty_rule() {
        assert!(ExpansionRule::Always { expansions: vec![] }.is_empty());
        assert!(!ExpansionRule::Never.is_empty());
        assert!(!ExpansionRule::always(&["x"]).is_empty());
    }
}
