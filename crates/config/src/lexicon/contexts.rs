//! Situational context patterns

use serde::{Deserialize, Serialize};

use super::entities::to_strings;

/// Named group of patterns tagging one situational modifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPatternEntry {
    pub name: String,
    /// Label reported when any pattern matches
    pub modifier: String,
    pub patterns: Vec<String>,
}

impl ContextPatternEntry {
    pub fn new(name: &str, modifier: &str, patterns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            modifier: modifier.to_string(),
            patterns: to_strings(patterns),
        }
    }
}

/// Words that reveal the register a question is asked in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DifficultyRegister {
    /// "basic", "simple" and similar; agree with easy candidates
    #[serde(default)]
    pub basic_markers: Vec<String>,
    /// "advanced", "detail" and similar; agree with hard candidates
    #[serde(default)]
    pub advanced_markers: Vec<String>,
}
