//! Edit distance helpers for typo-tolerant matching
//!
//! Levenshtein distance over chars (so Devanagari counts per code point),
//! plus a normalized similarity used by the direct matcher.

/// Configuration for fuzzy word matching
#[derive(Debug, Clone)]
pub struct EditDistanceConfig {
    /// Maximum edit distance to consider a match
    pub max_distance: usize,
    /// Words must be longer than this to take part
    pub min_word_length: usize,
    /// Shorter words are held to a distance of 1
    pub full_distance_length: usize,
}

impl Default for EditDistanceConfig {
    fn default() -> Self {
        Self {
            max_distance: 2,
            min_word_length: 3,
            full_distance_length: 5,
        }
    }
}

impl EditDistanceConfig {
    /// True when both words are long enough and within `max_distance`
    pub fn is_close(&self, a: &str, b: &str) -> bool {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        if len_a <= self.min_word_length || len_b <= self.min_word_length {
            return false;
        }
        let allowed = if len_a.min(len_b) < self.full_distance_length {
            self.max_distance.min(1)
        } else {
            self.max_distance
        };
        if len_a.abs_diff(len_b) > allowed {
            return false;
        }
        levenshtein_distance(a, b) <= allowed
    }
}

/// Calculate Levenshtein edit distance between two strings
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    // Two rows instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row: Vec<usize> = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        for j in 1..=len2 {
            let cost = usize::from(s1_chars[i - 1] != s2_chars[j - 1]);
            curr_row[j] = std::cmp::min(
                std::cmp::min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// `1 - distance / max_len`, in [0, 1]; two empty strings are identical
pub fn similarity(s1: &str, s2: &str) -> f32 {
    let max_len = s1.chars().count().max(s2.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(s1, s2) as f32 / max_len as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("excanger", "exchanger"), 1);
        assert_eq!(levenshtein_distance("जंग", "जंग"), 0);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abcd", "abcd"), 1.0);
        assert!((similarity("abcd", "abce") - 0.75).abs() < 1e-6);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_is_close() {
        let config = EditDistanceConfig::default();
        assert!(config.is_close("excanger", "exchanger"));
        assert!(config.is_close("baffel", "baffle"));
        // Too short to take part
        assert!(!config.is_close("pqr", "pqr"));
        assert!(!config.is_close("gasket", "flange"));
        // Four-letter words allow a single edit only
        assert!(config.is_close("haet", "heet"));
        assert!(!config.is_close("haal", "heat"));
        assert!(!config.is_close("what", "heat"));
    }
}
