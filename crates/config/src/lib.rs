//! Configuration management for the question matcher
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, or the file named by `QA_MATCH_CONFIG`)
//! - Environment variables (`QA_MATCH__` prefix, `__` separator)
//!
//! # Lexicon
//!
//! The entity, intent, context and expansion tables live in [`lexicon`].
//! A built-in table for the engineering QA/QC domain is always available via
//! `LexiconConfig::builtin()`; a YAML file can replace it. Tables are
//! validated and compiled once at startup into an immutable
//! `CompiledLexicon`.

pub mod lexicon;
pub mod settings;
pub mod validator;

pub use lexicon::{
    fold_text, AdjacentQualifier, CompiledContext, CompiledEntity, CompiledIntent,
    CompiledLexicon, CompiledPartial, ContextPatternEntry, ContextualExpansion,
    DifficultyRegister, EntitySemanticEntry, ExpansionRule, IntentPatternEntry, LexiconConfig,
    PartialTerm, QuestionIntent,
};
pub use settings::{
    load_settings, BoostSettings, EngineSettings, NormalizerSettings, ScoringSettings, Settings,
    ThresholdSettings,
};
pub use validator::{
    LexiconValidator, ValidationCategory, ValidationError, ValidationResult, ValidationSeverity,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Invalid pattern in {source_name}: {message}")]
    InvalidPattern { source_name: String, message: String },

    #[error("Lexicon validation failed: {0}")]
    InvalidLexicon(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for qa_match_core::Error {
    fn from(err: ConfigError) -> Self {
        qa_match_core::Error::Config(err.to_string())
    }
}
