//! Prompt Builder: assembles the report-generation request from role metadata,
//! resume text and the effective job description.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{
    fill_template, ReportTemplate, CONCISE_ROLE_CONTEXT, DETAILED_ROLE_CONTEXT,
};
use crate::llm_client::GenerationParams;
use crate::roles::{find_standard_role, join_first, RoleProfile};

/// Used when the role is unknown or custom and the user gave no description.
pub const GENERIC_JOB_DESCRIPTION: &str =
    "General professional role requiring relevant experience and skills.";

/// Similarity fallback text for unknown/custom roles without a description.
pub const GENERIC_COMPARISON_TEXT: &str =
    "Professional role requiring relevant experience and skills.";

/// Where the effective job description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobDescriptionSource {
    UserProvided,
    RoleStandard,
    Generic,
}

impl JobDescriptionSource {
    /// "TARGETED" when the user supplied the description, "GENERAL" otherwise.
    pub fn analysis_type(self) -> &'static str {
        match self {
            JobDescriptionSource::UserProvided => "TARGETED",
            JobDescriptionSource::RoleStandard | JobDescriptionSource::Generic => "GENERAL",
        }
    }
}

/// The job description a request is judged against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveJobDescription {
    pub text: String,
    pub source: JobDescriptionSource,
}

/// A fully built request for the report generator.
#[derive(Debug, Clone)]
pub struct ReportPrompt {
    pub text: String,
    pub params: GenerationParams,
    pub job_description: EffectiveJobDescription,
}

/// Returns the trimmed override when it carries any text.
fn user_description(job_description: Option<&str>) -> Option<&str> {
    job_description.map(str::trim).filter(|d| !d.is_empty())
}

/// Resolves the job description by priority: user text, role synthesis, generic fallback.
pub fn resolve_job_description(
    role: &str,
    job_description: Option<&str>,
) -> EffectiveJobDescription {
    if let Some(text) = user_description(job_description) {
        return EffectiveJobDescription {
            text: text.to_string(),
            source: JobDescriptionSource::UserProvided,
        };
    }

    match find_standard_role(role) {
        Some(profile) => EffectiveJobDescription {
            text: format!(
                "We are seeking a skilled {} with 3+ years experience in: {}. Strong proficiency in: {}.",
                profile.name,
                join_first(profile.key_skills, 8),
                join_first(profile.experience_focus, 5),
            ),
            source: JobDescriptionSource::RoleStandard,
        },
        None => EffectiveJobDescription {
            text: GENERIC_JOB_DESCRIPTION.to_string(),
            source: JobDescriptionSource::Generic,
        },
    }
}

/// Text the resume is embedded against for the similarity score.
///
/// Uses the full catalog entry (description, every skill and focus area) rather
/// than the shorter synthesized prompt description.
pub fn comparison_text(role: &str, job_description: Option<&str>) -> String {
    if let Some(text) = user_description(job_description) {
        return text.to_string();
    }

    match find_standard_role(role) {
        Some(profile) => format!(
            "{} Key skills: {} Experience areas: {}",
            profile.description,
            profile.key_skills.join(", "),
            profile.experience_focus.join(", "),
        ),
        None => GENERIC_COMPARISON_TEXT.to_string(),
    }
}

fn role_context(template: ReportTemplate, profile: &RoleProfile) -> String {
    let (block, skills, focus) = match template {
        ReportTemplate::Detailed => (
            DETAILED_ROLE_CONTEXT,
            profile.key_skills.join(", "),
            profile.experience_focus.join(", "),
        ),
        ReportTemplate::Concise => (
            CONCISE_ROLE_CONTEXT,
            join_first(profile.key_skills, 8),
            join_first(profile.experience_focus, 4),
        ),
    };
    fill_template(
        block,
        &[("role", profile.name), ("skills", &skills), ("focus", &focus)],
    )
}

/// Builds the generation prompt. The resume and effective job description are
/// embedded verbatim.
pub fn build_prompt(
    template: ReportTemplate,
    resume: &str,
    role: &str,
    job_description: Option<&str>,
    analysis_date: NaiveDate,
) -> ReportPrompt {
    let effective = resolve_job_description(role, job_description);
    let context = find_standard_role(role)
        .map(|profile| role_context(template, profile))
        .unwrap_or_default();
    let date = analysis_date.format("%B %d, %Y").to_string();
    let role_upper = role.to_uppercase();

    let text = fill_template(
        template.body(),
        &[
            ("role_context", &context),
            ("role", role),
            ("role_upper", &role_upper),
            ("analysis_date", &date),
            ("resume", resume),
            ("job_description", &effective.text),
        ],
    );

    ReportPrompt {
        text,
        params: template.params(),
        job_description: effective,
    }
}
