//! Question intent classification
//!
//! Scores every intent from its regex patterns, then resolves one primary
//! intent plus supporting and context intents.
//!
//! Scoring per intent: first strong pattern 40, otherwise first weak pattern
//! 20, plus 15 per contextual clue (at most two). The raw score is normalized
//! against 70 and multiplied by the entry's base weight.

use std::sync::Arc;

use qa_match_config::{CompiledIntent, CompiledLexicon, QuestionIntent};
use serde::Serialize;

const STRONG_SCORE: f32 = 40.0;
const WEAK_SCORE: f32 = 20.0;
const CLUE_SCORE: f32 = 15.0;
const MAX_CLUES: usize = 2;
const NORMALIZER: f32 = 70.0;
const DECISION_BONUS: f32 = 10.0;
/// Non-context intents at or above this are reported as supporting
const SUPPORTING_MIN: f32 = 40.0;

/// Which pattern group fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentTier {
    Strong,
    Weak,
    /// Only contextual clues matched
    Clue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentRole {
    Primary,
    Supporting,
    Context,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentMatch {
    pub intent: QuestionIntent,
    /// 0-100
    pub confidence: f32,
    pub tier: IntentTier,
    pub role: IntentRole,
}

/// Ranked intents of one text: primary first, then supporting by
/// confidence, then context intents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntentAnalysis {
    pub intents: Vec<IntentMatch>,
}

impl IntentAnalysis {
    pub fn primary(&self) -> Option<&IntentMatch> {
        self.intents.iter().find(|m| m.role == IntentRole::Primary)
    }

    /// Primary and supporting intents, context ones included
    pub fn names(&self) -> Vec<QuestionIntent> {
        self.intents.iter().map(|m| m.intent).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

/// Raw per-intent score before roles are assigned
#[derive(Debug, Clone, Copy)]
struct IntentScore {
    intent: QuestionIntent,
    confidence: f32,
    tier: IntentTier,
    /// Position in the lexicon, the tie-break for primary
    order: usize,
}

/// Intent classifier
pub struct IntentClassifier {
    lexicon: Arc<CompiledLexicon>,
}

impl IntentClassifier {
    pub fn new(lexicon: Arc<CompiledLexicon>) -> Self {
        Self { lexicon }
    }

    pub fn classify(&self, text: &str) -> IntentAnalysis {
        resolve_roles(self.score_all(text))
    }

    /// Classify several texts describing the same thing, keeping each
    /// intent's best score before roles are assigned
    pub fn classify_many<'a, I>(&self, texts: I) -> IntentAnalysis
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Vec<IntentScore> = Vec::new();
        for text in texts {
            for score in self.score_all(text) {
                match best.iter_mut().find(|b| b.intent == score.intent) {
                    Some(existing) if existing.confidence >= score.confidence => {}
                    Some(existing) => *existing = score,
                    None => best.push(score),
                }
            }
        }
        resolve_roles(best)
    }

    fn score_all(&self, text: &str) -> Vec<IntentScore> {
        let text = text.to_lowercase();
        if text.trim().is_empty() {
            return Vec::new();
        }

        self.lexicon
            .intents()
            .iter()
            .enumerate()
            .filter_map(|(order, entry)| score_intent(entry, &text, order))
            .collect()
    }
}

fn score_intent(entry: &CompiledIntent, text: &str, order: usize) -> Option<IntentScore> {
    let (base, tier) = if entry.strong.iter().any(|re| re.is_match(text)) {
        (STRONG_SCORE, IntentTier::Strong)
    } else if entry.weak.iter().any(|re| re.is_match(text)) {
        (WEAK_SCORE, IntentTier::Weak)
    } else {
        (0.0, IntentTier::Clue)
    };

    let clues = entry
        .clues
        .iter()
        .filter(|re| re.is_match(text))
        .take(MAX_CLUES)
        .count();

    let raw = base + clues as f32 * CLUE_SCORE;
    if raw <= 0.0 {
        return None;
    }

    let mut confidence = (raw / NORMALIZER * 100.0).min(100.0) * entry.base_weight;
    if entry.intent == QuestionIntent::Decision {
        confidence += DECISION_BONUS;
    }

    Some(IntentScore {
        intent: entry.intent,
        confidence: confidence.min(100.0),
        tier,
        order,
    })
}

fn resolve_roles(scores: Vec<IntentScore>) -> IntentAnalysis {
    let (mut context, mut candidates): (Vec<_>, Vec<_>) =
        scores.into_iter().partition(|s| s.intent.is_context());

    // Highest confidence first, declaration order on ties
    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.order.cmp(&b.order))
    });

    let mut intents = Vec::new();
    let mut rest = candidates.into_iter();

    if let Some(primary) = rest.next() {
        intents.push(to_match(primary, IntentRole::Primary));
        intents.extend(
            rest.filter(|s| s.confidence >= SUPPORTING_MIN)
                .map(|s| to_match(s, IntentRole::Supporting)),
        );
    }

    context.sort_by_key(|s| s.order);
    intents.extend(context.into_iter().map(|s| to_match(s, IntentRole::Context)));

    IntentAnalysis { intents }
}

fn to_match(score: IntentScore, role: IntentRole) -> IntentMatch {
    IntentMatch {
        intent: score.intent,
        confidence: score.confidence,
        tier: score.tier,
        role,
    }
}
