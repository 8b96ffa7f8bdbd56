use serde::Serialize;

use crate::model::{Decision, RiskLevel};

/// Highest score that is still LOW risk.
pub const LOW_RISK_MAX_SCORE: i32 = 30;
/// Highest score that is still MEDIUM risk.
pub const MEDIUM_RISK_MAX_SCORE: i32 = 60;

/// Map a summed score to a risk tier.
pub fn determine_tier(score: i32) -> RiskLevel {
    if score <= LOW_RISK_MAX_SCORE {
        RiskLevel::Low
    } else if score <= MEDIUM_RISK_MAX_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

pub fn determine_decision(tier: RiskLevel) -> Decision {
    match tier {
        RiskLevel::Low => Decision::Approve,
        RiskLevel::Medium => Decision::ManualReview,
        RiskLevel::High => Decision::Reject,
    }
}

pub fn determine_decision_from_score(score: i32) -> Decision {
    determine_decision(determine_tier(score))
}

/// Score together with the tier and decision it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub risk_score: i32,
    pub risk_level: RiskLevel,
    pub decision: Decision,
}

impl Assessment {
    pub fn from_score(risk_score: i32) -> Self {
        let risk_level = determine_tier(risk_score);
        Self {
            risk_score,
            risk_level,
            decision: determine_decision(risk_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(determine_tier(0), RiskLevel::Low);
        assert_eq!(determine_tier(30), RiskLevel::Low);
        assert_eq!(determine_tier(31), RiskLevel::Medium);
        assert_eq!(determine_tier(60), RiskLevel::Medium);
        assert_eq!(determine_tier(61), RiskLevel::High);
        assert_eq!(determine_tier(-15), RiskLevel::Low);
        assert_eq!(determine_tier(250), RiskLevel::High);
    }

    #[test]
    fn test_decision_per_tier() {
        assert_eq!(determine_decision(RiskLevel::Low), Decision::Approve);
        assert_eq!(determine_decision(RiskLevel::Medium), Decision::ManualReview);
        assert_eq!(determine_decision(RiskLevel::High), Decision::Reject);
    }

    #[test]
    fn test_decision_from_boundary_scores() {
        let expected = [
            (0, Decision::Approve),
            (30, Decision::Approve),
            (31, Decision::ManualReview),
            (60, Decision::ManualReview),
            (61, Decision::Reject),
            (100, Decision::Reject),
        ];
        for (score, decision) in expected {
            assert_eq!(determine_decision_from_score(score), decision, "score {}", score);
        }
    }

    #[test]
    fn test_assessment_from_score() {
        let assessment = Assessment::from_score(45);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert_eq!(assessment.decision, Decision::ManualReview);
    }

    proptest! {
        #[test]
        fn property_tier_is_monotonic(a in -500i32..500, b in -500i32..500) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(determine_tier(low) <= determine_tier(high));
        }

        #[test]
        fn property_decision_matches_tier(score in any::<i32>()) {
            let assessment = Assessment::from_score(score);
            prop_assert_eq!(assessment.decision, determine_decision(determine_tier(score)));
            prop_assert_eq!(assessment.decision, determine_decision_from_score(score));
        }
    }
}
