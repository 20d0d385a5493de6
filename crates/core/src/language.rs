//! Script detection for English / Hindi / Hinglish text
//!
//! Handles Devanagari, Latin and mixed (code-switched) text, plus
//! romanized Hindi that is written in Latin script but is not English.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Detected script in text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Script {
    /// Latin/ASCII script (English or romanized Hindi)
    Latin,
    /// Devanagari script (Hindi)
    Devanagari,
    /// Mixed scripts (code-switching)
    Mixed,
    /// No letters at all
    Unknown,
}

/// Script detection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptDetection {
    pub primary_script: Script,
    /// Fraction of letters that are Devanagari
    pub devanagari_ratio: f32,
    /// Fraction of letters that are Latin
    pub latin_ratio: f32,
    /// Number of romanized Hindi function words found
    pub romanized_hindi_markers: usize,
}

impl ScriptDetection {
    /// Whether the text carries any non-English script or Hindi markers
    pub fn is_non_english(&self) -> bool {
        self.devanagari_ratio > 0.0 || self.romanized_hindi_markers > 0
    }
}

/// Common romanized Hindi function words
///
/// Kept to words that are not also common English words.
static ROMANIZED_HINDI_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "kya", "hai", "hain", "hota", "hoti", "hote", "ka", "ki", "ke", "ko", "se", "mein", "me",
        "kaise", "kaisa", "kyu", "kyun", "kyon", "kab", "kahan", "kaun", "konsa", "kitna",
        "kitne", "matlab", "agar", "toh", "aur", "ya", "nahi", "nahin", "karta", "karte",
        "karna", "kare", "hum", "tum", "aap", "mujhe", "batao", "bataiye", "jaata", "jata",
        "wala", "wali", "liye", "lagta", "chahiye", "sakte", "dekha", "suna", "uska", "iska",
        "kaam", "prakar", "fark", "antar", "karan", "jaanch",
    ]
    .into_iter()
    .collect()
});

/// Script detector
#[derive(Debug, Clone, Default)]
pub struct ScriptDetector;

impl ScriptDetector {
    pub fn new() -> Self {
        Self
    }

    /// Check if character is Devanagari
    pub fn is_devanagari(c: char) -> bool {
        ('\u{0900}'..='\u{097F}').contains(&c)
    }

    /// Count romanized Hindi markers among the whitespace-separated words
    pub fn count_hindi_markers(text: &str) -> usize {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .filter(|w| ROMANIZED_HINDI_MARKERS.contains(w.to_lowercase().as_str()))
            .count()
    }

    /// Detect script composition
    pub fn detect(&self, text: &str) -> ScriptDetection {
        let mut devanagari = 0usize;
        let mut latin = 0usize;
        let mut letters = 0usize;
        for c in text.chars() {
            if Self::is_devanagari(c) {
                devanagari += 1;
                letters += 1;
            } else if c.is_ascii_alphabetic() {
                latin += 1;
                letters += 1;
            } else if c.is_alphabetic() {
                letters += 1;
            }
        }

        let total = letters.max(1) as f32;
        let devanagari_ratio = devanagari as f32 / total;
        let latin_ratio = latin as f32 / total;

        let primary_script = if letters == 0 {
            Script::Unknown
        } else if devanagari_ratio > 0.7 {
            Script::Devanagari
        } else if latin_ratio > 0.7 {
            Script::Latin
        } else if devanagari_ratio > 0.1 && latin_ratio > 0.1 {
            Script::Mixed
        } else if devanagari_ratio > latin_ratio {
            Script::Devanagari
        } else {
            Script::Latin
        };

        ScriptDetection {
            primary_script,
            devanagari_ratio,
            latin_ratio,
            romanized_hindi_markers: Self::count_hindi_markers(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_english() {
        let detection = ScriptDetector::new().detect("what is a heat exchanger");
        assert_eq!(detection.primary_script, Script::Latin);
        assert!(!detection.is_non_english());
    }

    #[test]
    fn test_romanized_hindi() {
        let detection = ScriptDetector::new().detect("WPS ka matlab kya hai");
        assert_eq!(detection.primary_script, Script::Latin);
        assert!(detection.romanized_hindi_markers >= 3);
        assert!(detection.is_non_english());
    }

    #[test]
    fn test_devanagari() {
        let detection = ScriptDetector::new().detect("हीट एक्सचेंजर क्या है");
        assert_eq!(detection.primary_script, Script::Devanagari);
        assert!(detection.is_non_english());
    }

    #[test]
    fn test_mixed() {
        let detection = ScriptDetector::new().detect("gasket क्या होता hai");
        assert_eq!(detection.primary_script, Script::Mixed);
    }

    #[test]
    fn test_empty() {
        let detection = ScriptDetector::new().detect("  ?? ");
        assert_eq!(detection.primary_script, Script::Unknown);
        assert!(!detection.is_non_english());
    }
}
