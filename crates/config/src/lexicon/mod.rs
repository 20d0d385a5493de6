//! Lexicon tables
//!
//! Static pattern and term tables that drive normalization, entity
//! resolution, intent classification, context detection and boosting.
//! `LexiconConfig` is the serde form (built-in or YAML); `CompiledLexicon`
//! is the validated, regex-compiled form every stage reads from.

mod compiled;
mod contexts;
mod defaults;
mod entities;
mod intents;

pub use compiled::{
    fold_text, CompiledContext, CompiledEntity, CompiledIntent, CompiledLexicon, CompiledPartial,
};
pub use contexts::{ContextPatternEntry, DifficultyRegister};
pub use entities::{
    AdjacentQualifier, ContextualExpansion, EntitySemanticEntry, ExpansionRule, PartialTerm,
};
pub use intents::{IntentPatternEntry, QuestionIntent};

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::validator::LexiconValidator;
use crate::ConfigError;

/// Serializable lexicon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Entity key -> tiered terms
    #[serde(default)]
    pub entities: BTreeMap<String, EntitySemanticEntry>,
    /// Intent patterns, in tie-break order
    #[serde(default)]
    pub intents: Vec<IntentPatternEntry>,
    #[serde(default)]
    pub contexts: Vec<ContextPatternEntry>,
    /// Explicit expansion rules; these win over rules derived from entities
    #[serde(default)]
    pub expansion_rules: BTreeMap<String, ExpansionRule>,
    /// Intent word -> substitutes used for query variants
    #[serde(default)]
    pub intent_keywords: BTreeMap<String, Vec<String>>,
    /// Category label -> keywords that earn the category boost
    #[serde(default)]
    pub category_keywords: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub difficulty: DifficultyRegister,
    /// Common words never taken as a fuzzy spelling of an entity term
    #[serde(default)]
    pub fuzzy_excluded_words: Vec<String>,
}

impl LexiconConfig {
    /// Built-in engineering QA/QC lexicon
    pub fn builtin() -> Self {
        defaults::builtin()
    }

    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let lexicon = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            entities = lexicon.entities.len(),
            intents = lexicon.intents.len(),
            "Loaded lexicon"
        );
        Ok(lexicon)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Built-in lexicon, or the YAML file at `path` when given
    pub fn load_or_builtin(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Rule table keyed by recognized word
    ///
    /// Sources in increasing precedence: entity abbreviations (`Always` to
    /// the first core term), partial-term rules, explicit rules.
    pub fn merged_expansion_rules(&self) -> HashMap<String, ExpansionRule> {
        let mut rules = HashMap::new();

        for entry in self.entities.values() {
            let Some(canonical) = entry.canonical().map(fold_text) else {
                continue;
            };
            for abbreviation in &entry.abbreviations {
                rules.insert(
                    fold_text(abbreviation),
                    ExpansionRule::Always {
                        expansions: vec![canonical.clone()],
                    },
                );
            }
        }

        for entry in self.entities.values() {
            for partial in &entry.partials {
                let key = fold_text(&partial.term);
                // A partial that never expands must not hide an abbreviation
                if partial.rule == ExpansionRule::Never && rules.contains_key(&key) {
                    continue;
                }
                rules.insert(key, partial.rule.clone());
            }
        }

        for (word, rule) in &self.expansion_rules {
            rules.insert(fold_text(word), rule.clone());
        }

        rules.retain(|word, _| !word.is_empty());
        rules
    }

    /// Validate and compile into the form the matcher reads
    pub fn compile(&self) -> Result<CompiledLexicon, ConfigError> {
        let report = LexiconValidator::new().validate(self);
        for warning in report.warnings() {
            tracing::warn!(%warning, "Lexicon warning");
        }
        if !report.is_ok() {
            let details: Vec<String> = report
                .errors_and_critical()
                .iter()
                .map(|e| e.to_string())
                .collect();
            for detail in &details {
                tracing::error!(%detail, "Lexicon error");
            }
            return Err(ConfigError::InvalidLexicon(format!(
                "{}: {}",
                report.summary(),
                details.join("; ")
            )));
        }

        let entities = self
            .entities
            .iter()
            .map(|(key, entry)| {
                let core_terms = compiled::fold_all(&entry.core_terms);
                CompiledEntity {
                    key: key.clone(),
                    core_words: compiled::core_words(&core_terms),
                    core_terms,
                    abbreviations: compiled::fold_all(&entry.abbreviations),
                    typos: compiled::fold_all(&entry.typos),
                    related: compiled::fold_all(&entry.related),
                    partials: entry
                        .partials
                        .iter()
                        .map(|p| CompiledPartial {
                            term: fold_text(&p.term),
                            strong: p.strong,
                        })
                        .filter(|p| !p.term.is_empty())
                        .collect(),
                }
            })
            .collect();

        let mut intents = Vec::with_capacity(self.intents.len());
        for entry in &self.intents {
            let source = format!("intents.{}", entry.intent);
            intents.push(CompiledIntent {
                intent: entry.intent,
                strong: compiled::compile_patterns(&source, &entry.strong)?,
                weak: compiled::compile_patterns(&source, &entry.weak)?,
                clues: compiled::compile_patterns(&source, &entry.clues)?,
                base_weight: entry.base_weight,
            });
        }

        let mut contexts = Vec::with_capacity(self.contexts.len());
        for entry in &self.contexts {
            let source = format!("contexts.{}", entry.name);
            let patterns = entry
                .patterns
                .iter()
                .map(|p| compiled::compile_pattern(&source, p).map(|re| (p.clone(), re)))
                .collect::<Result<Vec<_>, _>>()?;
            contexts.push(CompiledContext {
                name: entry.name.clone(),
                modifier: entry.modifier.clone(),
                patterns,
            });
        }

        let fold_table = |table: &BTreeMap<String, Vec<String>>| -> HashMap<String, Vec<String>> {
            table
                .iter()
                .map(|(key, values)| (fold_text(key), compiled::fold_all(values)))
                .filter(|(key, _)| !key.is_empty())
                .collect()
        };

        let difficulty = DifficultyRegister {
            basic_markers: compiled::fold_all(&self.difficulty.basic_markers),
            advanced_markers: compiled::fold_all(&self.difficulty.advanced_markers),
        };

        let lexicon = CompiledLexicon {
            entities,
            intents,
            contexts,
            expansion_rules: self.merged_expansion_rules(),
            intent_keywords: fold_table(&self.intent_keywords),
            category_keywords: fold_table(&self.category_keywords),
            difficulty,
            fuzzy_excluded_words: compiled::fold_all(&self.fuzzy_excluded_words)
                .into_iter()
                .filter(|w| !w.is_empty())
                .collect::<HashSet<_>>(),
        };

        tracing::debug!(
            entities = lexicon.entities.len(),
            intents = lexicon.intents.len(),
            contexts = lexicon.contexts.len(),
            rules = lexicon.expansion_rules.len(),
            "Compiled lexicon"
        );

        Ok(lexicon)
    }
}
