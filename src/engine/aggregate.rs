use serde::{Deserialize, Serialize};

use super::domain::{Classification, ScoreSet};
use super::normalize::round1;
use super::score::SubScores;

/// Fixed rubric weights combining the four sub-scores into the ROI value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricWeights {
    pub skill_match: f64,
    pub credibility: f64,
    pub acceptance_probability: f64,
    pub career_impact: f64,
}

impl RubricWeights {
    /// Build a weight set. The weights must sum to exactly 1.00; anything
    /// else is a construction-time invariant violation.
    pub fn new(
        skill_match: f64,
        credibility: f64,
        acceptance_probability: f64,
        career_impact: f64,
    ) -> Self {
        let total = skill_match + credibility + acceptance_probability + career_impact;
        assert!(
            (total - 1.0).abs() < 1e-9,
            "rubric weights must sum to 1.00, got {total}"
        );
        Self {
            skill_match,
            credibility,
            acceptance_probability,
            career_impact,
        }
    }

    fn roi(&self, sub: &SubScores) -> f64 {
        round1(
            self.skill_match * sub.skill_match
                + self.credibility * sub.credibility
                + self.acceptance_probability * sub.acceptance_probability
                + self.career_impact * sub.career_impact,
        )
    }
}

impl Default for RubricWeights {
    fn default() -> Self {
        Self::new(0.30, 0.25, 0.25, 0.20)
    }
}

/// Non-overlapping, exhaustive bands over roi in [0, 10]; each band is
/// inclusive on its lower edge.
pub(crate) fn classify(roi: f64) -> Classification {
    if roi >= 7.5 {
        Classification::StrongApply
    } else if roi >= 5.0 {
        Classification::ApplyIfLowEffort
    } else {
        Classification::NotWorthIt
    }
}

pub(crate) fn aggregate(sub: &SubScores, weights: &RubricWeights) -> ScoreSet {
    let roi = weights.roi(sub);
    ScoreSet {
        skill_match: sub.skill_match,
        credibility: sub.credibility,
        acceptance_probability: sub.acceptance_probability,
        career_impact: sub.career_impact,
        roi,
        classification: classify(roi),
    }
}
