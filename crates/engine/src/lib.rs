//! Scoring and orchestration for the bilingual question matcher
//!
//! Features:
//! - Direct-match shortcut (exact, abbreviation-aware, near-exact)
//! - Semantic scorer fusing entity, intent, expansion and fuzzy signals
//! - Adaptive threshold from the score distribution
//! - Secondary boosts (category, length, script, tag, difficulty)
//! - Parallel per-candidate scoring with rayon
//! - Observers for tracing and metrics

pub mod analysis;
pub mod booster;
pub mod direct;
pub mod observers;
pub mod orchestrator;
pub mod scorer;
pub mod threshold;

pub use analysis::{CandidateProfile, QueryAnalysis, TextAnalysis, VariantAnalysis};
pub use booster::{BoostQuery, Booster};
pub use direct::{DirectMatch, DirectMatchResult, DirectMatchType, DirectMatcher};
pub use observers::{MetricsObserver, TracingObserver};
pub use orchestrator::QuestionMatcher;
pub use scorer::SemanticScorer;
pub use threshold::{AdaptiveThreshold, ThresholdDecision};

use thiserror::Error;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),
}

impl From<qa_match_config::ConfigError> for EngineError {
    fn from(err: qa_match_config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

impl From<qa_match_text_processing::TextProcessingError> for EngineError {
    fn from(err: qa_match_text_processing::TextProcessingError) -> Self {
        EngineError::TextProcessing(err.to_string())
    }
}

impl From<EngineError> for qa_match_core::Error {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Config(msg) => qa_match_core::Error::Config(msg),
            other => qa_match_core::Error::Engine(other.to_string()),
        }
    }
}
