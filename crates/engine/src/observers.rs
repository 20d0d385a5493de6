//! Match observers backed by `tracing` and `metrics`

use metrics::{counter, histogram};
use qa_match_core::{MatchEvent, MatchObserver};

/// Logs every event through `tracing`; the matcher's default observer
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn on_event(&self, event: &MatchEvent<'_>) {
        match event {
            MatchEvent::QueryNormalized {
                raw,
                cleaned,
                variants,
            } => {
                tracing::debug!(raw = %raw, cleaned = %cleaned, variants, "Query normalized");
            }
            MatchEvent::DirectHit {
                candidate_id,
                confidence,
                match_type,
            } => {
                tracing::debug!(
                    candidate = %candidate_id,
                    confidence,
                    match_type = %match_type,
                    "Direct match"
                );
            }
            MatchEvent::CandidateScored {
                candidate_id,
                base_score,
                total_score,
            } => {
                tracing::trace!(candidate = %candidate_id, base_score, total_score, "Candidate scored");
            }
            MatchEvent::ThresholdComputed { gap, threshold } => {
                tracing::debug!(gap, threshold, "Adaptive threshold");
            }
            MatchEvent::Completed {
                stage,
                top_score,
                candidates_scored,
                elapsed_us,
            } => {
                tracing::info!(
                    stage = stage.map(|s| s.as_str()).unwrap_or("none"),
                    top_score = top_score.unwrap_or(0.0),
                    candidates = candidates_scored,
                    elapsed_us,
                    "Search completed"
                );
            }
            MatchEvent::NoMatch { reason } => {
                tracing::debug!(reason = ?reason, "No match");
            }
        }
    }
}

/// Records search counters and score histograms through the `metrics` facade
///
/// No exporter is installed here; the embedding application chooses one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObserver;

impl MatchObserver for MetricsObserver {
    fn on_event(&self, event: &MatchEvent<'_>) {
        match event {
            MatchEvent::DirectHit { match_type, .. } => {
                counter!("qa_match_direct_hits_total", "match_type" => match_type.to_string())
                    .increment(1);
            }
            MatchEvent::ThresholdComputed { threshold, .. } => {
                histogram!("qa_match_threshold").record(*threshold as f64);
            }
            MatchEvent::Completed {
                stage,
                top_score,
                candidates_scored,
                elapsed_us,
            } => {
                let (stage, outcome) = match stage {
                    Some(stage) => (stage.as_str(), "matched"),
                    None => ("none", "no_match"),
                };
                counter!("qa_match_searches_total", "stage" => stage, "outcome" => outcome)
                    .increment(1);
                counter!("qa_match_candidates_scored_total").increment(*candidates_scored as u64);
                if let Some(score) = top_score {
                    histogram!("qa_match_top_score").record(*score as f64);
                }
                histogram!("qa_match_search_duration_us").record(*elapsed_us as f64);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_match_core::{MatchStage, NoMatchReason};

    fn events(reason: &NoMatchReason) -> Vec<MatchEvent<'_>> {
        vec![
            MatchEvent::QueryNormalized {
                raw: "WPS kya hai?",
                cleaned: "wps kya hai",
                variants: 3,
            },
            MatchEvent::DirectHit {
                candidate_id: "q1",
                confidence: 100.0,
                match_type: "exact",
            },
            MatchEvent::CandidateScored {
                candidate_id: "q1",
                base_score: 80.0,
                total_score: 90.0,
            },
            MatchEvent::ThresholdComputed {
                gap: 32.0,
                threshold: 65.0,
            },
            MatchEvent::Completed {
                stage: Some(MatchStage::Pipeline),
                top_score: Some(90.0),
                candidates_scored: 2,
                elapsed_us: 120,
            },
            MatchEvent::NoMatch { reason },
        ]
    }

    #[test]
    fn test_observers_accept_every_event() {
        // Without an installed recorder or subscriber these are no-ops
        let reason = NoMatchReason::EmptyQuery;
        for event in events(&reason) {
            TracingObserver.on_event(&event);
            MetricsObserver.on_event(&event);
        }
    }
}
