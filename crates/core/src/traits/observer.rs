//! Observability sink for search diagnostics
//!
//! Events are side effects only; nothing in the matching algorithm depends on
//! an observer being present.

use crate::result::{MatchStage, NoMatchReason};

/// Diagnostic event emitted during a search
#[derive(Debug, Clone)]
pub enum MatchEvent<'a> {
    /// Query was cleaned and expanded
    QueryNormalized {
        raw: &'a str,
        cleaned: &'a str,
        variants: usize,
    },
    /// Direct-match shortcut produced a hit at or above the gate
    DirectHit {
        candidate_id: &'a str,
        confidence: f32,
        match_type: &'a str,
    },
    /// One candidate's best score (pre-sort)
    CandidateScored {
        candidate_id: &'a str,
        base_score: f32,
        total_score: f32,
    },
    /// Adaptive threshold for the sorted score list
    ThresholdComputed { gap: f32, threshold: f32 },
    /// Search finished
    Completed {
        stage: Option<MatchStage>,
        top_score: Option<f32>,
        candidates_scored: usize,
        elapsed_us: u64,
    },
    /// Search finished without a match
    NoMatch { reason: &'a NoMatchReason },
}

/// Injectable observer
pub trait MatchObserver: Send + Sync {
    fn on_event(&self, event: &MatchEvent<'_>);
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {
    fn on_event(&self, _event: &MatchEvent<'_>) {}
}
