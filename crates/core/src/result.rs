//! Match results and search outcomes

use serde::{Deserialize, Serialize};

use crate::candidate::CandidateRecord;

/// Confidence tier derived from a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceTier {
    pub const VERY_HIGH_MIN: f32 = 85.0;
    pub const HIGH_MIN: f32 = 70.0;
    pub const MEDIUM_MIN: f32 = 55.0;

    pub fn from_score(score: f32) -> Self {
        if score >= Self::VERY_HIGH_MIN {
            Self::VeryHigh
        } else if score >= Self::HIGH_MIN {
            Self::High
        } else if score >= Self::MEDIUM_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryHigh => "VERY_HIGH",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// Per-component score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Entity agreement (max 40)
    pub entity: f32,
    /// Intent agreement (max 35)
    pub intent: f32,
    /// Expansion keyword coverage (max 15)
    pub expansion: f32,
    /// Fuzzy keyword overlap (max 10)
    pub fuzzy: f32,
}

impl ScoreBreakdown {
    /// Sum of components clamped to [0, 100]
    pub fn total(&self) -> f32 {
        (self.entity + self.intent + self.expansion + self.fuzzy).clamp(0.0, 100.0)
    }
}

/// Scored candidate produced by one scoring call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: String,
    /// Position of the candidate in the snapshot passed to the search
    pub candidate_index: usize,
    /// Final score after boosting, clamped to [0, 100]
    pub total_score: f32,
    /// Score before boosting
    pub base_score: f32,
    pub breakdown: ScoreBreakdown,
    pub confidence: ConfidenceTier,
    pub boost: f32,
    pub boost_reasons: Vec<String>,
    /// Query variant that produced the base score
    pub matched_variant: String,
}

impl MatchResult {
    /// Build an unboosted result from a breakdown
    pub fn new(
        candidate_id: impl Into<String>,
        candidate_index: usize,
        breakdown: ScoreBreakdown,
        matched_variant: impl Into<String>,
    ) -> Self {
        let base = breakdown.total();
        Self {
            candidate_id: candidate_id.into(),
            candidate_index,
            total_score: base,
            base_score: base,
            breakdown,
            confidence: ConfidenceTier::from_score(base),
            boost: 0.0,
            boost_reasons: Vec::new(),
            matched_variant: matched_variant.into(),
        }
    }

    /// Result of the direct-match shortcut; the confidence is the score
    pub fn direct(
        candidate_id: impl Into<String>,
        candidate_index: usize,
        confidence: f32,
        match_type: &str,
        matched_text: impl Into<String>,
    ) -> Self {
        let score = confidence.clamp(0.0, 100.0);
        Self {
            candidate_id: candidate_id.into(),
            candidate_index,
            total_score: score,
            base_score: score,
            breakdown: ScoreBreakdown::default(),
            confidence: ConfidenceTier::from_score(score),
            boost: 0.0,
            boost_reasons: vec![format!("direct:{}", match_type)],
            matched_variant: matched_text.into(),
        }
    }

    /// Return a new result with the boost applied and the tier recomputed
    pub fn boosted(self, boost: f32, reasons: Vec<String>) -> Self {
        let total = (self.base_score + boost).clamp(0.0, 100.0);
        Self {
            total_score: total,
            confidence: ConfidenceTier::from_score(total),
            boost,
            boost_reasons: reasons,
            ..self
        }
    }
}

/// Candidate together with its result, as handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: CandidateRecord,
    pub result: MatchResult,
}

/// Which stage produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    /// Exact / near-exact / abbreviation-aware shortcut
    Direct,
    /// Full normalization and scoring pipeline
    Pipeline,
}

impl MatchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Pipeline => "pipeline",
        }
    }
}

/// Why a search produced no match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoMatchReason {
    /// Query empty or nothing left after cleaning
    EmptyQuery,
    /// Snapshot had no candidates
    NoCandidates,
    /// Nothing reached the adaptive threshold
    BelowThreshold { best_score: f32, threshold: f32 },
}

/// Search bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub candidates_scored: usize,
    pub variants: usize,
    pub elapsed_us: u64,
}

/// Outcome of one `match` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchOutcome {
    Matched {
        success: MatchedFlag,
        top_match: ScoredCandidate,
        alternates: Vec<ScoredCandidate>,
        stage: MatchStage,
        threshold: f32,
        stats: SearchStats,
    },
    NoMatch {
        success: NoMatchFlag,
        reason: NoMatchReason,
        stats: SearchStats,
    },
}

/// Serializes as `true`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchedFlag;

/// Serializes as `false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoMatchFlag;

impl Serialize for MatchedFlag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for MatchedFlag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match bool::deserialize(deserializer)? {
            true => Ok(Self),
            false => Err(serde::de::Error::custom("expected success = true")),
        }
    }
}

impl Serialize for NoMatchFlag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(false)
    }
}

impl<'de> Deserialize<'de> for NoMatchFlag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match bool::deserialize(deserializer)? {
            false => Ok(Self),
            true => Err(serde::de::Error::custom("expected success = false")),
        }
    }
}

impl MatchOutcome {
    pub fn matched(
        top_match: ScoredCandidate,
        alternates: Vec<ScoredCandidate>,
        stage: MatchStage,
        threshold: f32,
        stats: SearchStats,
    ) -> Self {
        Self::Matched {
            success: MatchedFlag,
            top_match,
            alternates,
            stage,
            threshold,
            stats,
        }
    }

    pub fn no_match(reason: NoMatchReason, stats: SearchStats) -> Self {
        Self::NoMatch {
            success: NoMatchFlag,
            reason,
            stats,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn top_match(&self) -> Option<&ScoredCandidate> {
        match self {
            Self::Matched { top_match, .. } => Some(top_match),
            Self::NoMatch { .. } => None,
        }
    }

    pub fn alternates(&self) -> &[ScoredCandidate] {
        match self {
            Self::Matched { alternates, .. } => alternates,
            Self::NoMatch { .. } => &[],
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            Self::Matched { stats, .. } | Self::NoMatch { stats, .. } => stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::from_score(100.0), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_score(85.0), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_score(84.9), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(70.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(55.0), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(54.0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::VeryHigh.as_str(), "VERY_HIGH");
    }

    #[test]
    fn test_breakdown_total_clamped() {
        let breakdown = ScoreBreakdown {
            entity: 40.0,
            intent: 35.0,
            expansion: 15.0,
            fuzzy: 10.0,
        };
        assert_eq!(breakdown.total(), 100.0);
    }

    #[test]
    fn test_boost_clamps_and_recomputes_tier() {
        let breakdown = ScoreBreakdown {
            entity: 40.0,
            intent: 30.0,
            ..Default::default()
        };
        let result = MatchResult::new("q1", 0, breakdown, "wps");
        assert_eq!(result.confidence, ConfidenceTier::High);

        let boosted = result.boosted(40.0, vec!["category".into()]);
        assert_eq!(boosted.total_score, 100.0);
        assert_eq!(boosted.base_score, 70.0);
        assert_eq!(boosted.confidence, ConfidenceTier::VeryHigh);
    }

    #[test]
    fn test_direct_result() {
        let result = MatchResult::direct("q7", 3, 95.0, "abbreviation", "wps kya hai");
        assert_eq!(result.total_score, 95.0);
        assert_eq!(result.breakdown, ScoreBreakdown::default());
        assert_eq!(result.boost_reasons, vec!["direct:abbreviation".to_string()]);
        assert_eq!(MatchStage::Direct.as_str(), "direct");
    }

    #[test]
    fn test_outcome_serializes_success_flag() {
        let outcome = MatchOutcome::no_match(NoMatchReason::EmptyQuery, SearchStats::default());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(false));
        assert_eq!(json["reason"]["kind"], "empty_query");
        assert!(!outcome.is_success());
        assert!(outcome.top_match().is_none());
    }
}
