//! Analysis pipeline: orchestrates one resume review end to end.
//!
//! Flow: validate → credential check → similarity → build prompt →
//!       generate report → extract scores → aggregate.
//!
//! Steps run strictly in sequence. Nothing is kept once the result is returned.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::aggregator::{assess, growth_potential, overall_percentage, Assessment};
use crate::analysis::prompt_builder::{build_prompt, comparison_text, JobDescriptionSource};
use crate::analysis::prompts::ReportTemplate;
use crate::analysis::scores::{extract_scores, label_scores, CategoryScore};
use crate::analysis::validation::validate_inputs;
use crate::errors::AppError;
use crate::extraction::{DocumentText, ResumeStats};
use crate::llm_client::ReportGenerator;
use crate::similarity::{SimilarityScore, SimilarityScorer};

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API Configuration Required: Please set up your GROQ_API_KEY in a .env file.";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One analysis request. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: DocumentText,
    pub role: String,
    /// User-supplied description; blank is treated as absent.
    pub job_description: Option<String>,
}

/// Everything computed for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub role: String,
    /// "TARGETED" or "GENERAL"
    pub analysis_type: String,
    pub job_description_source: JobDescriptionSource,
    pub template: ReportTemplate,
    pub resume_stats: ResumeStats,
    /// Full precision; display values are derived from it.
    pub similarity: SimilarityScore,
    pub ats_percentage: f64,
    /// Positional; may hold fewer than six entries.
    pub sub_scores: Vec<CategoryScore>,
    pub overall_percentage: f64,
    pub growth_potential: f64,
    pub assessment: Assessment,
    pub report: String,
    pub analyzed_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs analyses against a fixed scorer, generator and template.
#[derive(Clone)]
pub struct Analyzer {
    scorer: SimilarityScorer,
    generator: Arc<dyn ReportGenerator>,
    template: ReportTemplate,
}

impl Analyzer {
    pub fn new(
        scorer: SimilarityScorer,
        generator: Arc<dyn ReportGenerator>,
        template: ReportTemplate,
    ) -> Self {
        Self {
            scorer,
            generator,
            template,
        }
    }

    pub fn template(&self) -> ReportTemplate {
        self.template
    }

    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AppError> {
        let analysis_id = Uuid::new_v4();
        let resume = request.resume.as_str();
        let job_description = request.job_description.as_deref();

        // Step 1: Validate inputs
        let errors = validate_inputs(resume, job_description);
        if !errors.is_empty() {
            info!("Analysis {analysis_id} rejected: {} validation errors", errors.len());
            return Err(AppError::Validation(errors));
        }

        // Step 2: Credential check, before any remote work
        if !self.generator.has_credential() {
            return Err(AppError::Configuration(
                MISSING_CREDENTIAL_MESSAGE.to_string(),
            ));
        }

        // Step 3: Semantic similarity
        info!("Analysis {analysis_id}: calculating ATS compatibility for '{}'", request.role);
        let comparison = comparison_text(&request.role, job_description);
        let similarity = self
            .scorer
            .similarity_async(resume.to_string(), comparison)
            .await;

        // Step 4: Build prompt
        let analyzed_at = Utc::now();
        let prompt = build_prompt(
            self.template,
            resume,
            &request.role,
            job_description,
            analyzed_at.date_naive(),
        );

        // Step 5: Generate report
        info!(
            "Analysis {analysis_id}: generating {} report ({:?} job description)",
            self.template, prompt.job_description.source
        );
        let report = self
            .generator
            .generate(&prompt.text, prompt.params)
            .await
            .map_err(|e| AppError::Llm(e.user_message()))?;

        // Step 6: Extract sub-scores
        let scores = extract_scores(&report, self.template);
        if scores.is_empty() {
            warn!("Analysis {analysis_id}: no sub-scores found in report");
        }

        // Step 7: Aggregate
        let overall = overall_percentage(&scores);
        let assessment = assess(similarity, overall);

        info!(
            "Analysis {analysis_id} complete: ats={}%, overall={}%, tier={:?}",
            similarity.ats_percentage(),
            overall,
            assessment.tier
        );

        Ok(AnalysisResult {
            analysis_id,
            role: request.role,
            analysis_type: prompt.job_description.source.analysis_type().to_string(),
            job_description_source: prompt.job_description.source,
            template: self.template,
            resume_stats: request.resume.stats(),
            similarity,
            ats_percentage: similarity.ats_percentage(),
            sub_scores: label_scores(&scores),
            overall_percentage: overall,
            growth_potential: growth_potential(overall),
            assessment,
            report,
            analyzed_at,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
