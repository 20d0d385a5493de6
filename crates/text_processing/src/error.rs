//! Text processing errors

use qa_match_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Normalizer error: {0}")]
    Normalizer(String),
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;

impl From<ConfigError> for TextProcessingError {
    fn from(err: ConfigError) -> Self {
        TextProcessingError::Lexicon(err.to_string())
    }
}

impl From<TextProcessingError> for qa_match_core::Error {
    fn from(err: TextProcessingError) -> Self {
        qa_match_core::Error::TextProcessing(err.to_string())
    }
}
