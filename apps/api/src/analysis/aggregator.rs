//! Aggregator: combines the similarity score and extracted sub-scores into
//! an overall percentage and a qualitative tier.

use serde::{Deserialize, Serialize};

use crate::analysis::scores::SCORE_SCALE;
use crate::similarity::SimilarityScore;

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Mean sub-score as a percentage of the 5-point scale, 1 decimal.
/// No sub-scores means no signal: 0.0.
pub fn overall_percentage(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    round_to(mean / SCORE_SCALE * 100.0, 1)
}

/// Remaining headroom above the overall percentage, 1 decimal.
pub fn growth_potential(overall: f64) -> f64 {
    round_to(100.0 - overall, 1)
}

/// Qualitative match tier. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentTier {
    ExcellentMatch,
    StrongCandidate,
    ModerateFit,
    NeedsDevelopment,
}

impl AssessmentTier {
    pub const ALL: [AssessmentTier; 4] = [
        AssessmentTier::ExcellentMatch,
        AssessmentTier::StrongCandidate,
        AssessmentTier::ModerateFit,
        AssessmentTier::NeedsDevelopment,
    ];

    pub fn from_combined(combined: f64) -> Self {
        if combined >= 85.0 {
            AssessmentTier::ExcellentMatch
        } else if combined >= 70.0 {
            AssessmentTier::StrongCandidate
        } else if combined >= 55.0 {
            AssessmentTier::ModerateFit
        } else {
            AssessmentTier::NeedsDevelopment
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssessmentTier::ExcellentMatch => "Excellent Match",
            AssessmentTier::StrongCandidate => "Strong Candidate",
            AssessmentTier::ModerateFit => "Moderate Fit",
            AssessmentTier::NeedsDevelopment => "Needs Development",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AssessmentTier::ExcellentMatch => "🟢",
            AssessmentTier::StrongCandidate => "🟡",
            AssessmentTier::ModerateFit => "🟠",
            AssessmentTier::NeedsDevelopment => "🔴",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AssessmentTier::ExcellentMatch => {
                "Outstanding alignment with job requirements. You're highly competitive for this role."
            }
            AssessmentTier::StrongCandidate => {
                "Good foundation with some areas for strategic improvement."
            }
            AssessmentTier::ModerateFit => {
                "Solid potential but requires focused enhancement in key areas."
            }
            AssessmentTier::NeedsDevelopment => {
                "Significant improvements needed to be competitive for this role."
            }
        }
    }

    /// Parses the label back, with or without the leading icon.
    pub fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|tier| {
            text == tier.label()
                || text
                    .strip_prefix(tier.icon())
                    .is_some_and(|rest| rest.trim() == tier.label())
        })
    }
}

/// A tier plus the blended score it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub tier: AssessmentTier,
    pub label: String,
    pub description: String,
    /// (similarity × 100 + overall) / 2, full precision.
    pub combined_score: f64,
}

/// Blends similarity (full precision) and overall percentage equally, then buckets.
pub fn assess(similarity: SimilarityScore, overall: f64) -> Assessment {
    let combined_score = (similarity.value() * 100.0 + overall) / 2.0;
    let tier = AssessmentTier::from_combined(combined_score);
    Assessment {
        tier,
        label: format!("{} {}", tier.icon(), tier.label()),
        description: tier.description().to_string(),
        combined_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_percentage_empty_is_zero() {
        assert_eq!(overall_percentage(&[]), 0.0);
    }

    #[test]
    fn test_overall_percentage_perfect_is_hundred() {
        assert_eq!(overall_percentage(&[5.0; 6]), 100.0);
    }

    #[test]
    fn test_overall_percentage_rounds_to_one_decimal() {
        // mean 3.5333.. → 70.666..%
        assert_eq!(overall_percentage(&[4.0, 3.5, 3.1]), 70.7);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(AssessmentTier::from_combined(85.0), AssessmentTier::ExcellentMatch);
        assert_eq!(AssessmentTier::from_combined(84.9), AssessmentTier::StrongCandidate);
        assert_eq!(AssessmentTier::from_combined(70.0), AssessmentTier::StrongCandidate);
        assert_eq!(AssessmentTier::from_combined(69.9), AssessmentTier::ModerateFit);
        assert_eq!(AssessmentTier::from_combined(55.0), AssessmentTier::ModerateFit);
        assert_eq!(AssessmentTier::from_combined(54.9), AssessmentTier::NeedsDevelopment);
        assert_eq!(AssessmentTier::from_combined(0.0), AssessmentTier::NeedsDevelopment);
    }

    #[test]
    fn test_assess_blends_similarity_and_overall() {
        let assessment = assess(SimilarityScore::new(0.9), 80.0);
        assert!((assessment.combined_score - 85.0).abs() < 1e-9);
        assert_eq!(assessment.tier, AssessmentTier::ExcellentMatch);
        assert_eq!(assessment.label, "🟢 Excellent Match");
    }

    #[test]
    fn test_assess_uses_full_precision_similarity() {
        // 0.6996 rounds to 0.7 for display, but the blend must not use the rounded value.
        let assessment = assess(SimilarityScore::new(0.6996), 40.0);
        assert!(assessment.combined_score < 55.0);
        assert_eq!(assessment.tier, AssessmentTier::NeedsDevelopment);
    }

    #[test]
    fn test_growth_potential() {
        assert_eq!(growth_potential(72.3), 27.7);
        assert_eq!(growth_potential(0.0), 100.0);
    }

    #[test]
    fn test_tier_label_round_trip() {
        for tier in AssessmentTier::ALL {
            assert_eq!(AssessmentTier::from_label(tier.label()), Some(tier));
            let decorated = format!("{} {}", tier.icon(), tier.label());
            assert_eq!(AssessmentTier::from_label(&decorated), Some(tier));
        }
        assert_eq!(AssessmentTier::from_label("Great"), None);
    }
}
