//! Input validation: runs before any remote call is made.

pub const MIN_RESUME_CHARS: usize = 150;
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 100;

pub const RESUME_TOO_SHORT: &str =
    "❌ Resume content seems too short. Please provide a complete resume with all sections.";
pub const JOB_DESCRIPTION_TOO_SHORT: &str =
    "❌ Job description seems too short. Please provide a detailed job description.";

/// Returns every failed check. Empty means the inputs are acceptable.
///
/// A job description is only checked when the user actually supplied one;
/// an absent or blank description falls back to the role catalog instead.
pub fn validate_inputs(resume: &str, job_description: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();

    if resume.trim().chars().count() < MIN_RESUME_CHARS {
        errors.push(RESUME_TOO_SHORT.to_string());
    }

    if let Some(jd) = job_description.map(str::trim).filter(|jd| !jd.is_empty()) {
        if jd.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
            errors.push(JOB_DESCRIPTION_TOO_SHORT.to_string());
        }
    }

    errors
}
