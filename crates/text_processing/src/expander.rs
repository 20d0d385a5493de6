//! Query variant generation
//!
//! Turns one cleaned query into a small set of variants by expanding
//! abbreviations, partial terms and intent words according to the lexicon's
//! rule table. The cleaned query is always the first variant.

use std::collections::HashSet;
use std::sync::Arc;

use qa_match_config::{CompiledLexicon, ExpansionRule, NormalizerSettings};

/// Which rule produced a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantSource {
    Original,
    Always,
    Adjacent,
    Context,
    /// Every `Always` rule applied at once
    Combined,
    IntentKeyword,
}

/// Query variant with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVariant {
    pub text: String,
    pub source: VariantSource,
}

/// Generates query variants from the lexicon's expansion rules
#[derive(Clone)]
pub struct QueryExpander {
    lexicon: Arc<CompiledLexicon>,
    max_variants: usize,
    /// Longest rule key, in words
    max_key_words: usize,
}

impl QueryExpander {
    pub fn new(lexicon: Arc<CompiledLexicon>, settings: &NormalizerSettings) -> Self {
        let max_key_words = lexicon
            .expansion_rules()
            .keys()
            .chain(lexicon.intent_keywords().keys())
            .map(|k| k.split_whitespace().count())
            .max()
            .unwrap_or(1)
            .max(1);

        Self {
            lexicon,
            max_variants: settings.max_variants.max(1),
            max_key_words,
        }
    }

    /// Variant texts, original first, deduplicated, capped at `max_variants`
    pub fn expand(&self, cleaned: &str) -> Vec<String> {
        self.expand_detailed(cleaned)
            .into_iter()
            .map(|v| v.text)
            .collect()
    }

    pub fn expand_detailed(&self, cleaned: &str) -> Vec<QueryVariant> {
        let mut out = VariantSet::new(self.max_variants);
        out.push(cleaned.to_string(), VariantSource::Original);

        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.is_empty() {
            return out.into_vec();
        }

        for (start, len, key) in self.windows(&tokens) {
            let Some(rule) = self.lexicon.rule_for(&key) else {
                continue;
            };
            match rule {
                ExpansionRule::Always { expansions } => {
                    for expansion in expansions {
                        out.push(
                            splice(&tokens, start, start + len, expansion),
                            VariantSource::Always,
                        );
                    }
                }
                ExpansionRule::Never => {}
                ExpansionRule::CheckAdjacent { qualifiers } => {
                    for qualifier in qualifiers {
                        let end = start + len;
                        if tokens.get(end) == Some(&qualifier.word.as_str()) {
                            out.push(
                                splice(&tokens, start, end + 1, &qualifier.phrase),
                                VariantSource::Adjacent,
                            );
                        } else if start > 0 && tokens[start - 1] == qualifier.word {
                            out.push(
                                splice(&tokens, start - 1, end, &qualifier.phrase),
                                VariantSource::Adjacent,
                            );
                        }
                    }
                }
                ExpansionRule::CheckContext { alternatives } => {
                    for alternative in alternatives {
                        let present = tokens.iter().enumerate().any(|(i, token)| {
                            (i < start || i >= start + len)
                                && alternative.context_words.iter().any(|w| w.as_str() == *token)
                        });
                        if present {
                            out.push(
                                splice(&tokens, start, start + len, &alternative.expansion),
                                VariantSource::Context,
                            );
                        }
                    }
                }
            }
        }

        let combined = self.expand_abbreviations(cleaned);
        if combined != cleaned {
            out.push(combined, VariantSource::Combined);
        }

        for (start, len, key) in self.windows(&tokens) {
            if let Some(substitutes) = self.lexicon.intent_keywords().get(&key) {
                for substitute in substitutes {
                    out.push(
                        splice(&tokens, start, start + len, substitute),
                        VariantSource::IntentKeyword,
                    );
                }
            }
        }

        out.into_vec()
    }

    /// Replace every word carrying an `Always` rule by its first expansion
    ///
    /// Used to compare abbreviated and spelled-out texts directly.
    pub fn expand_abbreviations(&self, text: &str) -> String {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut parts: Vec<&str> = Vec::with_capacity(tokens.len());
        let mut i = 0;

        'outer: while i < tokens.len() {
            let longest = self.max_key_words.min(tokens.len() - i);
            for len in (1..=longest).rev() {
                let key = tokens[i..i + len].join(" ");
                if let Some(ExpansionRule::Always { expansions }) = self.lexicon.rule_for(&key) {
                    if let Some(first) = expansions.first() {
                        parts.push(first.as_str());
                        i += len;
                        continue 'outer;
                    }
                }
            }
            parts.push(tokens[i]);
            i += 1;
        }

        parts.join(" ")
    }

    /// Rule keys (abbreviations and other expandable terms) present in `text`
    pub fn rule_keys(&self, text: &str) -> HashSet<String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        self.windows(&tokens)
            .into_iter()
            .filter(|(_, _, key)| {
                matches!(self.lexicon.rule_for(key), Some(rule) if !matches!(rule, ExpansionRule::Never))
            })
            .map(|(_, _, key)| key)
            .collect()
    }

    /// Every (start, length, joined key) window up to the longest rule key
    fn windows(&self, tokens: &[&str]) -> Vec<(usize, usize, String)> {
        let mut windows = Vec::new();
        for start in 0..tokens.len() {
            let longest = self.max_key_words.min(tokens.len() - start);
            for len in 1..=longest {
                windows.push((start, len, tokens[start..start + len].join(" ")));
            }
        }
        windows
    }
}

/// Replace `tokens[start..end]` with `replacement`
fn splice(tokens: &[&str], start: usize, end: usize, replacement: &str) -> String {
    tokens[..start]
        .iter()
        .copied()
        .chain(std::iter::once(replacement))
        .chain(tokens[end..].iter().copied())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered, deduplicated, capped variant list
struct VariantSet {
    items: Vec<QueryVariant>,
    seen: HashSet<String>,
    cap: usize,
}

impl VariantSet {
    fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    fn push(&mut self, text: String, source: VariantSource) {
        if self.items.len() >= self.cap || self.seen.contains(&text) {
            return;
        }
        self.seen.insert(text.clone());
        self.items.push(QueryVariant { text, source });
    }

    fn into_vec(self) -> Vec<QueryVariant> {
        self.items
    }
}
