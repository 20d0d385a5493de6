//! Adaptive pass threshold
//!
//! A clear leader (large gap to the runner-up) lowers the bar; a crowded top
//! raises it.

use qa_match_config::ThresholdSettings;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdDecision {
    /// Top score minus runner-up, 0 with fewer than two scores
    pub gap: f32,
    pub threshold: f32,
}

#[derive(Debug, Clone)]
pub struct AdaptiveThreshold {
    settings: ThresholdSettings,
}

impl AdaptiveThreshold {
    pub fn new(settings: ThresholdSettings) -> Self {
        Self { settings }
    }

    /// Threshold for scores already sorted descending
    pub fn compute(&self, sorted_scores: &[f32]) -> ThresholdDecision {
        let gap = match sorted_scores {
            [first, second, ..] => (first - second).max(0.0),
            _ => 0.0,
        };
        ThresholdDecision {
            gap,
            threshold: self.for_gap(gap),
        }
    }

    pub fn for_gap(&self, gap: f32) -> f32 {
        let s = &self.settings;
        if gap > s.wide_gap {
            s.wide_threshold
        } else if gap > s.medium_gap {
            s.medium_threshold
        } else if gap > s.narrow_gap {
            s.narrow_threshold
        } else {
            s.default_threshold
        }
    }
}

impl Default for AdaptiveThreshold {
    fn default() -> Self {
        Self::new(ThresholdSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        let t = AdaptiveThreshold::default();
        assert_eq!(t.for_gap(31.0), 65.0);
        assert_eq!(t.for_gap(30.0), 75.0);
        assert_eq!(t.for_gap(21.0), 75.0);
        assert_eq!(t.for_gap(20.0), 85.0);
        assert_eq!(t.for_gap(10.5), 85.0);
        assert_eq!(t.for_gap(10.0), 90.0);
        assert_eq!(t.for_gap(0.0), 90.0);
    }

    #[test]
    fn test_monotonic_as_gap_shrinks() {
        let t = AdaptiveThreshold::default();
        let mut previous = 0.0;
        for gap in (0..=100).rev() {
            let threshold = t.for_gap(gap as f32);
            assert!(threshold >= previous);
            previous = threshold;
        }
    }

    #[test]
    fn test_clear_leader() {
        let decision = AdaptiveThreshold::default().compute(&[92.0, 60.0]);
        assert_eq!(decision.gap, 32.0);
        assert_eq!(decision.threshold, 65.0);
    }

    #[test]
    fn test_degenerate_lists() {
        let t = AdaptiveThreshold::default();
        assert_eq!(t.compute(&[]).threshold, 90.0);
        let single = t.compute(&[80.0]);
        assert_eq!(single.gap, 0.0);
        assert_eq!(single.threshold, 90.0);
    }

    #[test]
    fn test_configured_breakpoints() {
        let t = AdaptiveThreshold::new(ThresholdSettings {
            wide_gap: 40.0,
            wide_threshold: 50.0,
            ..Default::default()
        });
        assert_eq!(t.for_gap(35.0), 75.0);
        assert_eq!(t.for_gap(45.0), 50.0);
    }
}
