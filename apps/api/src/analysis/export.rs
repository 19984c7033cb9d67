//! Report export: the downloadable plain-text report and its reader.
//!
//! Everything rendered comes from the stored `AnalysisResult`, so re-reading
//! an export gives back exactly the numbers computed during analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::analysis::aggregator::AssessmentTier;
use crate::analysis::pipeline::AnalysisResult;

const RULE: &str = "═══════════════════════════════════════════════════════════════════════════════";

const ATS_PREFIX: &str = "• ATS Compatibility: ";
const OVERALL_PREFIX: &str = "• Overall Performance: ";
const ASSESSMENT_PREFIX: &str = "• Assessment: ";

#[derive(Debug, Error, PartialEq)]
pub enum ExportParseError {
    #[error("export is missing the '{0}' line")]
    MissingField(&'static str),

    #[error("invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// The headline numbers recovered from an exported report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSummary {
    pub ats_percentage: f64,
    pub overall_percentage: f64,
    pub tier: AssessmentTier,
}

/// Formats a number the way the scores are shown everywhere else: always with
/// a fractional part (`80.0`, `4.5`).
fn number(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

fn heading(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
}

/// Renders the full plain-text report.
pub fn render_export(result: &AnalysisResult) -> String {
    let mut out = String::new();

    heading(&mut out, "🎯 RESUME ANALYSIS REPORT");
    out.push('\n');

    heading(&mut out, "📋 EXECUTIVE SUMMARY");
    // Role stays on one line.
    let role = result.role.replace(['\r', '\n'], " ");
    out.push_str(&format!("Target Role: {role}\n"));
    out.push_str(&format!(
        "Analysis Date: {}\n",
        result.analyzed_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Analysis Type: {} - AI-Generated\n\n",
        result.analysis_type
    ));

    heading(&mut out, "📊 PERFORMANCE SCORES");
    out.push_str(&format!("{ATS_PREFIX}{}%\n", number(result.ats_percentage)));
    out.push_str(&format!(
        "{OVERALL_PREFIX}{}%\n",
        number(result.overall_percentage)
    ));
    out.push_str(&format!("{ASSESSMENT_PREFIX}{}\n", result.assessment.label));
    out.push_str(&format!(
        "• Growth Potential: +{}% improvement available\n\n",
        number(result.growth_potential)
    ));

    heading(&mut out, "🎯 INDIVIDUAL SCORES");
    for score in &result.sub_scores {
        out.push_str(&format!(
            "• {}: {}/5 ({}%)\n",
            score.category,
            number(score.score),
            number(score.percentage)
        ));
    }
    out.push('\n');

    heading(&mut out, "📋 DETAILED ANALYSIS & RECOMMENDATIONS");
    out.push_str(result.report.trim_end());
    out.push_str("\n\n");

    heading(&mut out, "⚡ IMPLEMENTATION GUIDE");
    out.push_str(
        "1. Complete Priority Actions within 48 hours\n\
         2. Implement content optimizations in Week 1\n\
         3. Test optimized resume with 5+ applications\n\
         4. Track response rates and adjust strategy\n\n",
    );

    heading(&mut out, "✅ SUCCESS TARGETS");
    out.push_str(&format!(
        "□ ATS Score: 75%+ (Current: {}%)\n",
        number(result.ats_percentage)
    ));
    out.push_str(&format!(
        "□ Overall Score: 85%+ (Current: {}%)\n",
        number(result.overall_percentage)
    ));
    out.push_str(
        "□ Interview Rate: +25% improvement expected\n\
         □ Response Time: <2 weeks average\n\n",
    );

    out.push_str(RULE);
    out.push_str(
        "\nGenerated by Smart Resume Reviewer AI - Career Intelligence Platform\n\
         For optimization: Re-analyze your updated resume after improvements\n",
    );
    out.push_str(RULE);
    out.push('\n');

    out
}

/// `resume_analysis_<role>_<YYYYmmdd_HHMM>.txt`, role lowercased with
/// anything outside `[a-z0-9-]` replaced by `_`.
pub fn export_filename(role: &str, timestamp: DateTime<Utc>) -> String {
    let slug: String = role
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!(
        "resume_analysis_{slug}_{}.txt",
        timestamp.format("%Y%m%d_%H%M")
    )
}

fn field<'a>(text: &'a str, prefix: &'static str) -> Result<&'a str, ExportParseError> {
    text.lines()
        .find_map(|line| line.trim().strip_prefix(prefix))
        .map(str::trim)
        .ok_or(ExportParseError::MissingField(prefix.trim()))
}

fn percentage(text: &str, prefix: &'static str) -> Result<f64, ExportParseError> {
    let raw = field(text, prefix)?;
    raw.trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| ExportParseError::InvalidValue {
            field: prefix.trim(),
            value: raw.to_string(),
        })
}

/// Reads the headline numbers back from an export. The first occurrence of
/// each line wins, so text inside the generated analysis cannot override it.
pub fn parse_export(text: &str) -> Result<ExportSummary, ExportParseError> {
    let ats_percentage = percentage(text, ATS_PREFIX)?;
    let overall_percentage = percentage(text, OVERALL_PREFIX)?;
    let label = field(text, ASSESSMENT_PREFIX)?;
    let tier = AssessmentTier::from_label(label).ok_or_else(|| ExportParseError::InvalidValue {
        field: ASSESSMENT_PREFIX.trim(),
        value: label.to_string(),
    })?;

    Ok(ExportSummary {
        ats_percentage,
        overall_percentage,
        tier,
    })
}
