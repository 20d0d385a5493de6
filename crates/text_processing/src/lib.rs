//! Query understanding for the question matcher
//!
//! This crate provides the text stages that run before scoring:
//! - **Normalizer**: strips conversational noise, idempotent
//! - **Expander**: abbreviation, partial-term and intent-word variants
//! - **Entity Resolver**: tiered mapping to canonical domain entities
//! - **Intent Classifier**: primary, supporting and context intents
//! - **Context Detector**: situational modifiers
//!
//! Every stage reads the same `Arc<CompiledLexicon>`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use qa_match_config::{LexiconConfig, NormalizerSettings};
//! use qa_match_text_processing::{EntityResolver, QueryNormalizer};
//!
//! let lexicon = Arc::new(LexiconConfig::builtin().compile()?);
//! let normalizer = QueryNormalizer::new(&NormalizerSettings::default())?;
//! let cleaned = normalizer.clean("Tum mujhe batao ki WPS kya hai?");
//! let entities = EntityResolver::new(lexicon).resolve(&cleaned);
//! ```

pub mod context;
pub mod edit_distance;
pub mod entities;
pub mod expander;
pub mod intent;
pub mod normalizer;

mod error;

pub use error::{Result, TextProcessingError};

pub use context::{ContextDetector, ContextMatch};
pub use edit_distance::{levenshtein_distance, similarity, EditDistanceConfig};
pub use entities::{EntityMatch, EntityResolver, EntityTier, TierEvaluator};
pub use expander::{QueryExpander, QueryVariant, VariantSource};
pub use intent::{IntentAnalysis, IntentClassifier, IntentMatch, IntentRole, IntentTier};
pub use normalizer::QueryNormalizer;
