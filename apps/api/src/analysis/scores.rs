//! Score Extractor: pulls numeric sub-scores out of the free-text report.
//!
//! Matching is best-effort: the Nth surviving number is assigned to the Nth
//! category, with no check that it actually sits under that heading.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::aggregator::round_to;
use crate::analysis::prompts::ReportTemplate;

/// Category order the extracted scores map onto.
pub const SCORE_CATEGORIES: [&str; 6] = [
    "Technical Skills",
    "Experience",
    "Achievements",
    "Education",
    "ATS Optimization",
    "Presentation",
];

pub const MAX_SCORES: usize = SCORE_CATEGORIES.len();
pub const SCORE_SCALE: f64 = 5.0;

static OUT_OF_TEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)/10").unwrap());
static OUT_OF_FIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)/5").unwrap());
static LABELLED_OUT_OF_FIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Score[:\s]*(\d+(?:\.\d+)?)/5").unwrap());
static WORDED_OUT_OF_FIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*out\s*of\s*5").unwrap());

/// Patterns in priority order. The 10-point pattern only applies to layouts
/// that ask for 10-point scores.
fn patterns(template: ReportTemplate) -> Vec<&'static Regex> {
    let mut patterns = Vec::with_capacity(4);
    if template.score_ceiling() == 10 {
        patterns.push(&*OUT_OF_TEN);
    }
    patterns.extend([&*OUT_OF_FIVE, &*LABELLED_OUT_OF_FIVE, &*WORDED_OUT_OF_FIVE]);
    patterns
}

/// Values above 5 are taken to be on a 10-point scale.
/// A value of exactly 5 is ambiguous and treated as 5-point.
fn normalize(value: f64) -> f64 {
    if value > SCORE_SCALE {
        value / 2.0
    } else {
        value
    }
}

/// Extracts up to six sub-scores on the 0–5 scale, first-seen order,
/// deduplicated by value. Finding nothing is a valid (empty) result.
pub fn extract_scores(report: &str, template: ReportTemplate) -> Vec<f64> {
    let mut scores: Vec<f64> = Vec::with_capacity(MAX_SCORES);

    let matched = patterns(template).into_iter().flat_map(|re| {
        re.captures_iter(report)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().parse::<f64>().ok())
    });

    for value in matched.map(normalize) {
        if (0.0..=SCORE_SCALE).contains(&value) && !scores.contains(&value) {
            scores.push(value);
        }
    }

    scores.truncate(MAX_SCORES);
    debug!("Extracted {} sub-scores", scores.len());
    scores
}

/// A sub-score paired with its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    /// 0–5
    pub score: f64,
    /// score / 5 × 100, 1 decimal
    pub percentage: f64,
}

/// Pairs scores with [`SCORE_CATEGORIES`] by position. Trailing categories
/// without a score are omitted rather than zero-filled.
pub fn label_scores(scores: &[f64]) -> Vec<CategoryScore> {
    SCORE_CATEGORIES
        .iter()
        .zip(scores)
        .map(|(category, &score)| CategoryScore {
            category: category.to_string(),
            score,
            percentage: round_to(score / SCORE_SCALE * 100.0, 1),
        })
        .collect()
}
