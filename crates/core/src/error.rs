//! Error types shared across the matcher crates

use thiserror::Error;

/// Top-level error
///
/// Per-crate errors convert into this type via `From`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Knowledge store error: {0}")]
    Store(String),

    #[error("Duplicate candidate id: {0}")]
    DuplicateCandidate(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
