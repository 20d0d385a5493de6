//! Knowledge-base candidate records
//!
//! Records are owned by the external knowledge store. The matcher only reads
//! them; every field other than `id` may be missing and then contributes
//! nothing to scoring.

use serde::{Deserialize, Serialize};

/// Question difficulty register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Canonical question record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CandidateRecord {
    /// Stable identifier
    pub id: String,
    /// Question text in English
    #[serde(default)]
    pub question_en: String,
    /// Question text in Hindi (Devanagari or romanized)
    #[serde(default)]
    pub question_hi: String,
    /// Pre-normalized English text
    #[serde(default)]
    pub normalized_en: String,
    /// Pre-normalized Hindi text
    #[serde(default)]
    pub normalized_hi: String,
    /// English keywords (unordered, unique)
    #[serde(default)]
    pub keywords_en: Vec<String>,
    /// Hindi keywords (unordered, unique)
    #[serde(default)]
    pub keywords_hi: Vec<String>,
    /// Category labels
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Provenance label (e.g. "curated", "learned")
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub view_count: u64,
}

impl CandidateRecord {
    /// Create a record with only the identifier and bilingual question set
    pub fn new(
        id: impl Into<String>,
        question_en: impl Into<String>,
        question_hi: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question_en: question_en.into(),
            question_hi: question_hi.into(),
            ..Default::default()
        }
    }

    pub fn with_keywords(mut self, en: &[&str], hi: &[&str]) -> Self {
        self.keywords_en = en.iter().map(|s| s.to_string()).collect();
        self.keywords_hi = hi.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Non-empty question texts, English first
    pub fn question_texts(&self) -> impl Iterator<Item = &str> {
        [self.question_en.as_str(), self.question_hi.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
    }

    /// All non-empty texts usable for direct comparison
    pub fn comparable_texts(&self) -> impl Iterator<Item = &str> {
        [
            self.question_en.as_str(),
            self.question_hi.as_str(),
            self.normalized_en.as_str(),
            self.normalized_hi.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
    }

    /// Lowercased concatenation of question and normalized texts
    ///
    /// This is what entity and intent analysis run over on the candidate side.
    pub fn searchable_text(&self) -> String {
        self.comparable_texts()
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Combined, lowercased, de-duplicated keyword list (English first)
    pub fn combined_keywords(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.keywords_en.len() + self.keywords_hi.len());
        for kw in self.keywords_en.iter().chain(self.keywords_hi.iter()) {
            let kw = kw.trim().to_lowercase();
            if !kw.is_empty() && !out.contains(&kw) {
                out.push(kw);
            }
        }
        out
    }

    /// Word count of the question closest in length to `query_words`
    pub fn closest_question_word_count(&self, query_words: usize) -> Option<usize> {
        self.question_texts()
            .map(|q| q.split_whitespace().count())
            .min_by_key(|count| count.abs_diff(query_words))
    }
}
