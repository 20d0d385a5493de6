//! Lexicon validator
//!
//! Checks a `LexiconConfig` before compilation and collects every problem
//! instead of stopping at the first one:
//! - Empty tables and empty term lists
//! - Terms listed in two priority tiers of one entity
//! - Duplicate intent or context definitions
//! - Out-of-range intent weights
//! - Malformed regex patterns
//! - Expansion rules with nothing to expand into
//!
//! # Example
//!
//! ```ignore
//! use qa_match_config::{LexiconConfig, LexiconValidator};
//!
//! let report = LexiconValidator::new().validate(&LexiconConfig::builtin());
//! assert!(report.is_ok(), "{}", report.summary());
//! ```

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::lexicon::{fold_text, ExpansionRule, LexiconConfig};

/// Validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: ValidationCategory,
    /// Lexicon section
    pub source: String,
    /// Entry inside the section
    pub field: Option<String>,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field_str = self.field.as_deref().unwrap_or("(root)");
        write!(
            f,
            "[{:?}] {}/{}: {}",
            self.severity, self.source, field_str, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCategory {
    MissingRequired,
    /// Same term in two priority tiers
    TierOverlap,
    Duplicate,
    ValueOutOfRange,
    InvalidPattern,
    Unused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Warning,
    Error,
    /// Prevents compilation
    Critical,
}

/// Collected validation findings
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        category: ValidationCategory,
        severity: ValidationSeverity,
        source: &str,
        field: Option<&str>,
        message: String,
    ) {
        self.errors.push(ValidationError {
            category,
            source: source.to_string(),
            field: field.map(str::to_string),
            message,
            severity,
        });
    }

    pub fn add_critical(
        &mut self,
        category: ValidationCategory,
        source: &str,
        field: Option<&str>,
        message: impl Into<String>,
    ) {
        self.push(category, ValidationSeverity::Critical, source, field, message.into());
    }

    pub fn add_error(&mut self, source: &str, field: &str, message: impl Into<String>) {
        self.push(
            ValidationCategory::MissingRequired,
            ValidationSeverity::Error,
            source,
            Some(field),
            message.into(),
        );
    }

    pub fn add_warning(&mut self, source: &str, field: &str, message: impl Into<String>) {
        self.push(
            ValidationCategory::Unused,
            ValidationSeverity::Warning,
            source,
            Some(field),
            message.into(),
        );
    }

    /// No error or critical findings; warnings alone pass
    pub fn is_ok(&self) -> bool {
        self.errors_and_critical().is_empty()
    }

    pub fn critical_errors(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Critical)
            .collect()
    }

    /// Errors and critical errors (not warnings)
    pub fn errors_and_critical(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity >= ValidationSeverity::Error)
            .collect()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Warning)
    }

    pub fn summary(&self) -> String {
        let count = |severity| self.errors.iter().filter(|e| e.severity == severity).count();

        if self.errors.is_empty() {
            "Lexicon: all validations passed".to_string()
        } else {
            format!(
                "Lexicon: {} critical, {} errors, {} warnings",
                count(ValidationSeverity::Critical),
                count(ValidationSeverity::Error),
                count(ValidationSeverity::Warning)
            )
        }
    }
}

/// Lexicon validator
#[derive(Debug, Default)]
pub struct LexiconValidator;

impl LexiconValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, lexicon: &LexiconConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        self.validate_entities(lexicon, &mut result);
        self.validate_intents(lexicon, &mut result);
        self.validate_contexts(lexicon, &mut result);
        self.validate_expansion_rules(lexicon, &mut result);
        self.validate_keyword_tables(lexicon, &mut result);

        result
    }

    fn validate_entities(&self, lexicon: &LexiconConfig, result: &mut ValidationResult) {
        if lexicon.entities.is_empty() {
            result.add_critical(
                ValidationCategory::MissingRequired,
                "entities",
                None,
                "No entities defined",
            );
            return;
        }

        for (key, entry) in &lexicon.entities {
            if entry.core_terms.is_empty() {
                result.add_critical(
                    ValidationCategory::MissingRequired,
                    "entities",
                    Some(key),
                    "Entity has no core terms",
                );
            }

            let mut seen: HashMap<String, &'static str> = HashMap::new();
            for (tier, term) in entry.tiered_terms() {
                let folded = fold_text(term);
                if folded.is_empty() {
                    result.add_critical(
                        ValidationCategory::MissingRequired,
                        "entities",
                        Some(key),
                        format!("Empty term in {}", tier),
                    );
                    continue;
                }
                match seen.get(&folded) {
                    Some(first_tier) if *first_tier != tier => {
                        result.add_critical(
                            ValidationCategory::TierOverlap,
                            "entities",
                            Some(key),
                            format!("'{}' listed in both {} and {}", folded, first_tier, tier),
                        );
                    }
                    Some(_) => {
                        result.add_warning(
                            "entities",
                            key,
                            format!("'{}' listed twice in {}", folded, tier),
                        );
                    }
                    None => {
                        seen.insert(folded, tier);
                    }
                }
            }
        }
    }

    fn validate_intents(&self, lexicon: &LexiconConfig, result: &mut ValidationResult) {
        if lexicon.intents.is_empty() {
            result.add_critical(
                ValidationCategory::MissingRequired,
                "intents",
                None,
                "No intents defined",
            );
            return;
        }

        let mut seen = HashSet::new();
        for entry in &lexicon.intents {
            let name = entry.intent.as_str();
            if !seen.insert(entry.intent) {
                result.add_critical(
                    ValidationCategory::Duplicate,
                    "intents",
                    Some(name),
                    "Intent defined more than once",
                );
            }

            if !(entry.base_weight > 0.0 && entry.base_weight <= 2.0) {
                result.add_critical(
                    ValidationCategory::ValueOutOfRange,
                    "intents",
                    Some(name),
                    format!("base_weight must be in (0, 2], got {}", entry.base_weight),
                );
            }

            if entry.strong.is_empty() && entry.weak.is_empty() {
                result.add_error("intents", name, "Intent has no strong or weak patterns");
            }

            for pattern in entry.all_patterns() {
                check_pattern(result, "intents", name, pattern);
            }
        }
    }

    fn validate_contexts(&self, lexicon: &LexiconConfig, result: &mut ValidationResult) {
        let mut seen = HashSet::new();
        for entry in &lexicon.contexts {
            let name = entry.name.as_str();
            if !seen.insert(name) {
                result.add_critical(
                    ValidationCategory::Duplicate,
                    "contexts",
                    Some(name),
                    "Context defined more than once",
                );
            }
            if entry.patterns.is_empty() {
                result.add_critical(
                    ValidationCategory::MissingRequired,
                    "contexts",
                    Some(name),
                    "Context has no patterns",
                );
            }
            if entry.modifier.trim().is_empty() {
                result.add_error("contexts", name, "Context has no modifier label");
            }
            for pattern in &entry.patterns {
                check_pattern(result, "contexts", name, pattern);
            }
        }
    }

    fn validate_expansion_rules(&self, lexicon: &LexiconConfig, result: &mut ValidationResult) {
        let partial_rules = lexicon
            .entities
            .values()
            .flat_map(|e| e.partials.iter().map(|p| (p.term.as_str(), &p.rule)));
        let explicit_rules = lexicon
            .expansion_rules
            .iter()
            .map(|(word, rule)| (word.as_str(), rule));

        for (word, rule) in partial_rules.chain(explicit_rules) {
            if fold_text(word).is_empty() {
                result.add_critical(
                    ValidationCategory::MissingRequired,
                    "expansion_rules",
                    None,
                    "Rule keyed by an empty word",
                );
            }
            if rule.is_empty() {
                result.add_critical(
                    ValidationCategory::MissingRequired,
                    "expansion_rules",
                    Some(word),
                    format!("{} rule has nothing to expand into", rule.name()),
                );
            }
            if let ExpansionRule::CheckContext { alternatives } = rule {
                if alternatives.iter().any(|a| a.context_words.is_empty()) {
                    result.add_critical(
                        ValidationCategory::MissingRequired,
                        "expansion_rules",
                        Some(word),
                        "Contextual alternative without context words",
                    );
                }
            }
        }
    }

    fn validate_keyword_tables(&self, lexicon: &LexiconConfig, result: &mut ValidationResult) {
        for (category, keywords) in &lexicon.category_keywords {
            if keywords.is_empty() {
                result.add_warning("category_keywords", category, "Category has no keywords");
            }
        }
        for (word, substitutes) in &lexicon.intent_keywords {
            if substitutes.is_empty() {
                result.add_warning("intent_keywords", word, "Intent keyword has no substitutes");
            }
        }
    }
}

fn check_pattern(result: &mut ValidationResult, source: &str, field: &str, pattern: &str) {
    if let Err(e) = Regex::new(pattern) {
        result.add_critical(
            ValidationCategory::InvalidPattern,
            source,
            Some(field),
            format!("Invalid pattern '{}': {}", pattern, e),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{ContextPatternEntry, EntitySemanticEntry};

    #[test]
    fn test_builtin_passes() {
        let result = LexiconValidator::new().validate(&LexiconConfig::builtin());
        assert!(result.is_ok(), "{:?}", result.errors);
        assert!(result.errors_and_critical().is_empty());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut lexicon = LexiconConfig::builtin();
        lexicon
            .entities
            .insert("empty".to_string(), EntitySemanticEntry::default());
        lexicon.intents[1].base_weight = 3.0;
        lexicon.intents.push(lexicon.intents[0].clone());
        lexicon.contexts.push(ContextPatternEntry::new(
            "regular_check",
            "regular-check",
            &["[bad"],
        ));

        let result = LexiconValidator::new().validate(&lexicon);
        assert!(!result.is_ok());

        let categories: Vec<_> = result.critical_errors().iter().map(|e| e.category).collect();
        assert!(categories.contains(&ValidationCategory::MissingRequired));
        assert!(categories.contains(&ValidationCategory::ValueOutOfRange));
        assert!(categories.contains(&ValidationCategory::Duplicate));
        assert!(categories.contains(&ValidationCategory::InvalidPattern));
        assert!(result.summary().contains("critical"));
    }

    #[test]
    fn test_tier_overlap_after_folding() {
        let mut lexicon = LexiconConfig::builtin();
        lexicon.entities.insert(
            "xray".to_string(),
            EntitySemanticEntry::new(&["X-Ray"]).with_related(&["x ray"]),
        );
        let result = LexiconValidator::new().validate(&lexicon);
        let overlap = result
            .critical_errors()
            .into_iter()
            .find(|e| e.category == ValidationCategory::TierOverlap);
        assert!(overlap.is_some());
        assert_eq!(overlap.map(|e| e.field.as_deref()), Some(Some("xray")));
    }

    #[test]
    fn test_error_severity_fails() {
        let mut lexicon = LexiconConfig::builtin();
        lexicon.intents[0].strong.clear();
        lexicon.intents[0].weak.clear();
        lexicon.intents[0].clues.push(r"\bmatlab\b".to_string());
        lexicon.contexts[0].modifier = " ".to_string();

        let result = LexiconValidator::new().validate(&lexicon);
        assert!(result.critical_errors().is_empty());
        assert_eq!(result.errors_and_critical().len(), 2);
        assert!(!result.is_ok());
        assert!(result.summary().contains("2 errors"));
    }

    #[test]
    fn test_empty_rule_rejected() {
        let mut lexicon = LexiconConfig::builtin();
        lexicon
            .expansion_rules
            .insert("hx".to_string(), ExpansionRule::Always { expansions: vec![] });
        let result = LexiconValidator::new().validate(&lexicon);
        assert!(!result.is_ok());
    }
}
