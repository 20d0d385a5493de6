//! Entity resolution
//!
//! Maps text to canonical domain entities. Each entity is checked against an
//! ordered chain of tier evaluators; the first tier that fires decides the
//! entity's confidence and no lower tier is consulted.
//!
//! | tier | rule | confidence |
//! |---|---|---|
//! | exact | core term substring | 100 |
//! | abbreviation | whole word | 95 |
//! | typo | substring | 90 |
//! | related | substring | 70 |
//! | partial (multi) | two or more partials, whole words | 80 |
//! | partial (strong / weak) | exactly one partial | 60 / 30 |
//! | fuzzy | word edit distance <= 2 (1 for short words) | 50 |

use std::sync::Arc;

use qa_match_config::{fold_text, CompiledEntity, CompiledLexicon};
use serde::Serialize;

use crate::edit_distance::EditDistanceConfig;

/// Tier an entity match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTier {
    Exact,
    Abbreviation,
    Typo,
    Related,
    PartialMulti,
    PartialStrong,
    PartialWeak,
    Fuzzy,
}

impl EntityTier {
    pub fn confidence(&self) -> f32 {
        match self {
            Self::Exact => 100.0,
            Self::Abbreviation => 95.0,
            Self::Typo => 90.0,
            Self::Related => 70.0,
            Self::PartialMulti => 80.0,
            Self::PartialStrong => 60.0,
            Self::PartialWeak => 30.0,
            Self::Fuzzy => 50.0,
        }
    }
}

/// One resolved entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityMatch {
    pub entity: String,
    pub confidence: f32,
    pub tier: EntityTier,
    /// Lexicon term (or query word for fuzzy hits) that triggered the match
    pub matched_term: String,
}

/// Text prepared once for all evaluators
pub struct FoldedText {
    folded: String,
    /// `folded` with a leading and trailing space, for whole-word checks
    padded: String,
    words: Vec<String>,
}

impl FoldedText {
    pub fn new(text: &str) -> Self {
        let folded = fold_text(text);
        let padded = format!(" {} ", folded);
        let words = folded.split_whitespace().map(str::to_string).collect();
        Self {
            folded,
            padded,
            words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    fn contains(&self, term: &str) -> bool {
        self.folded.contains(term)
    }

    fn contains_word(&self, term: &str) -> bool {
        self.padded.contains(&format!(" {} ", term))
    }
}

/// One step of the tier chain
pub trait TierEvaluator: Send + Sync {
    /// Tier and matched term when this tier fires for the entity
    fn evaluate(&self, entity: &CompiledEntity, text: &FoldedText) -> Option<(EntityTier, String)>;
}

fn first_substring(terms: &[String], text: &FoldedText) -> Option<String> {
    terms.iter().find(|t| text.contains(t)).cloned()
}

struct ExactTier;

impl TierEvaluator for ExactTier {
    fn evaluate(&self, entity: &CompiledEntity, text: &FoldedText) -> Option<(EntityTier, String)> {
        first_substring(&entity.core_terms, text).map(|t| (EntityTier::Exact, t))
    }
}

struct AbbreviationTier;

impl TierEvaluator for AbbreviationTier {
    fn evaluate(&self, entity: &CompiledEntity, text: &FoldedText) -> Option<(EntityTier, String)> {
        entity
            .abbreviations
            .iter()
            .find(|a| text.contains_word(a))
            .map(|a| (EntityTier::Abbreviation, a.clone()))
    }
}

struct TypoTier;

impl TierEvaluator for TypoTier {
    fn evaluate(&self, entity: &CompiledEntity, text: &FoldedText) -> Option<(EntityTier, String)> {
        first_substring(&entity.typos, text).map(|t| (EntityTier::Typo, t))
    }
}

struct RelatedTier;

impl TierEvaluator for RelatedTier {
    fn evaluate(&self, entity: &CompiledEntity, text: &FoldedText) -> Option<(EntityTier, String)> {
        first_substring(&entity.related, text).map(|t| (EntityTier::Related, t))
    }
}

struct PartialTier;

impl TierEvaluator for PartialTier {
    fn evaluate(&self, entity: &CompiledEntity, text: &FoldedText) -> Option<(EntityTier, String)> {
        let present: Vec<_> = entity
            .partials
            .iter()
            .filter(|p| text.contains_word(&p.term))
            .collect();

        match present.as_slice() {
            [] => None,
            [only] if only.strong => Some((EntityTier::PartialStrong, only.term.clone())),
            [only] => Some((EntityTier::PartialWeak, only.term.clone())),
            many => Some((
                EntityTier::PartialMulti,
                many.iter()
                    .map(|p| p.term.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            )),
        }
    }
}

struct FuzzyTier {
    config: EditDistanceConfig,
    lexicon: Arc<CompiledLexicon>,
}

impl TierEvaluator for FuzzyTier {
    fn evaluate(&self, entity: &CompiledEntity, text: &FoldedText) -> Option<(EntityTier, String)> {
        text.words
            .iter()
            .filter(|word| !self.lexicon.is_fuzzy_excluded(word))
            .find(|word| {
                entity
                    .core_words
                    .iter()
                    .any(|core| self.config.is_close(word, core))
            })
            .map(|word| (EntityTier::Fuzzy, word.clone()))
    }
}

/// Resolves text to ranked entity matches
pub struct EntityResolver {
    lexicon: Arc<CompiledLexicon>,
    chain: Vec<Box<dyn TierEvaluator>>,
}

impl EntityResolver {
    pub fn new(lexicon: Arc<CompiledLexicon>) -> Self {
        Self::with_fuzzy_config(lexicon, EditDistanceConfig::default())
    }

    pub fn with_fuzzy_config(lexicon: Arc<CompiledLexicon>, config: EditDistanceConfig) -> Self {
        let chain: Vec<Box<dyn TierEvaluator>> = vec![
            Box::new(ExactTier),
            Box::new(AbbreviationTier),
            Box::new(TypoTier),
            Box::new(RelatedTier),
            Box::new(PartialTier),
            Box::new(FuzzyTier {
                config,
                lexicon: lexicon.clone(),
            }),
        ];
        Self { lexicon, chain }
    }

    /// Entities found in `text`, by confidence descending then key
    pub fn resolve(&self, text: &str) -> Vec<EntityMatch> {
        let folded = FoldedText::new(text);
        if folded.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<EntityMatch> = self
            .lexicon
            .entities()
            .iter()
            .filter_map(|entity| self.resolve_entity(entity, &folded))
            .collect();
        sort_matches(&mut matches);
        matches
    }

    /// Resolve several texts describing the same thing
    ///
    /// Each entity keeps its best match across the texts; texts are never
    /// concatenated, so terms cannot straddle two of them.
    pub fn resolve_many<'a, I>(&self, texts: I) -> Vec<EntityMatch>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Vec<EntityMatch> = Vec::new();
        for text in texts {
            for m in self.resolve(text) {
                match best.iter_mut().find(|b| b.entity == m.entity) {
                    Some(existing) if existing.confidence >= m.confidence => {}
                    Some(existing) => *existing = m,
                    None => best.push(m),
                }
            }
        }
        sort_matches(&mut best);
        best
    }

    /// Highest ranked entity, if any
    pub fn top(&self, text: &str) -> Option<EntityMatch> {
        self.resolve(text).into_iter().next()
    }

    fn resolve_entity(&self, entity: &CompiledEntity, text: &FoldedText) -> Option<EntityMatch> {
        self.chain.iter().find_map(|tier| {
            tier.evaluate(entity, text).map(|(tier, term)| EntityMatch {
                entity: entity.key.clone(),
                confidence: tier.confidence(),
                tier,
                matched_term: term,
            })
        })
    }
}

fn sort_matches(matches: &mut [EntityMatch]) {
    matches.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.entity.cmp(&b.entity))
    });
}
