//! Core types and traits for the bilingual question matcher
//!
//! This crate provides foundational types used across all other crates:
//! - Candidate records supplied by the knowledge store
//! - Match results, confidence tiers and search outcomes
//! - Script detection for English / Hindi / Hinglish text
//! - Pluggable seams (`KnowledgeStore`, `MatchObserver`)
//! - Error types

pub mod candidate;
pub mod error;
pub mod language;
pub mod result;
pub mod store;
pub mod traits;

pub use candidate::{CandidateRecord, Difficulty};
pub use error::{Error, Result};
pub use language::{Script, ScriptDetection, ScriptDetector};
pub use result::{
    ConfidenceTier, MatchOutcome, MatchResult, MatchStage, NoMatchReason, ScoreBreakdown,
    ScoredCandidate, SearchStats,
};
pub use store::InMemoryKnowledgeStore;
pub use traits::{KnowledgeStore, MatchEvent, MatchObserver, NoopObserver};
