// All LLM prompt templates for the Analysis module.
// Placeholders use `{name}` and are filled in a single pass by `fill_template`,
// so user text that happens to contain `{...}` is never re-expanded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::llm_client::GenerationParams;

/// Which report layout the generator is asked for. Chosen once by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTemplate {
    /// Long-form multi-section report, categories scored out of 5.
    Detailed,
    /// Short visually-formatted report, categories scored out of 10.
    #[default]
    Concise,
}

impl ReportTemplate {
    pub fn params(self) -> GenerationParams {
        match self {
            ReportTemplate::Detailed => GenerationParams {
                temperature: 0.2,
                max_tokens: 3500,
            },
            ReportTemplate::Concise => GenerationParams {
                temperature: 0.3,
                max_tokens: 1200,
            },
        }
    }

    /// Maximum per-category score the template asks the generator for.
    pub fn score_ceiling(self) -> u8 {
        match self {
            ReportTemplate::Detailed => 5,
            ReportTemplate::Concise => 10,
        }
    }

    pub(crate) fn body(self) -> &'static str {
        match self {
            ReportTemplate::Detailed => DETAILED_PROMPT_TEMPLATE,
            ReportTemplate::Concise => CONCISE_PROMPT_TEMPLATE,
        }
    }
}

impl fmt::Display for ReportTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTemplate::Detailed => f.write_str("detailed"),
            ReportTemplate::Concise => f.write_str("concise"),
        }
    }
}

impl FromStr for ReportTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detailed" => Ok(ReportTemplate::Detailed),
            "concise" => Ok(ReportTemplate::Concise),
            other => Err(format!("unknown report template '{other}'")),
        }
    }
}

/// Replaces every `{key}` in `template` with its value. Unknown keys are left as-is.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Role context block for the detailed template. Replace: {role}, {skills}, {focus}
pub const DETAILED_ROLE_CONTEXT: &str = "
**Target Role Context:**
- Position: {role}
- Key Skills Expected: {skills}
- Experience Focus Areas: {focus}
";

/// Role context block for the concise template. Replace: {role}, {skills}, {focus}
pub const CONCISE_ROLE_CONTEXT: &str = "
**🎯 TARGET ROLE**: {role}
**Key Skills**: {skills}
**Focus Areas**: {focus}
";

/// Long-form report. Replace: {role_context}, {resume}, {job_description}
pub const DETAILED_PROMPT_TEMPLATE: &str = r#"
You are an expert AI Resume Analyst and Senior Career Coach. Analyze the candidate's resume against the specific job requirements and provide a comprehensive report with actionable recommendations.

{role_context}

# COMPREHENSIVE RESUME ANALYSIS

## SECTION 1: EXECUTIVE SUMMARY
- Overall match percentage assessment
- Top 3 strengths identified
- Top 3 areas requiring immediate attention
- Competitive positioning analysis

## SECTION 2: DETAILED EVALUATION (Score each out of 5)

### Technical Skills Alignment (X/5)
- Current skills analysis vs. required skills
- Gap identification and specific missing skills
- Recommendations for skill additions

### Professional Experience Relevance (X/5)
- Experience alignment with role requirements
- Career progression analysis
- Industry background assessment

### Achievements & Impact (X/5)
- Quantification quality assessment
- Impact demonstration analysis
- Results communication effectiveness

### Education & Certifications (X/5)
- Educational background relevance
- Certification analysis
- Continuous learning evidence

### ATS Optimization (X/5)
- Keyword density analysis
- Format compatibility assessment
- Industry terminology usage

### Professional Presentation (X/5)
- Visual layout assessment
- Information hierarchy
- Writing quality and professionalism

## SECTION 3: PRIORITY UPGRADE PLAN

### CRITICAL UPGRADES (Implement in 24-48 hours)
1. [Specific action with location and example]
2. [Specific action with location and example]
3. [Specific action with location and example]

### CONTENT IMPROVEMENTS
- Skills Section: [Specific changes needed]
- Experience Section: [Bullet point improvements with examples]
- Education Section: [Relevance enhancements]
- Professional Summary: [Rewrite suggestions]

### ATS OPTIMIZATION
- Primary keywords to add: [List top 10 keywords]
- Format improvements: [Specific formatting changes]
- Section headers: [Recommended headers]

### IMPLEMENTATION ROADMAP
Phase 1 (Week 1): [Immediate actions]
Phase 2 (Week 2): [Content development]
Phase 3 (Week 3): [Advanced optimization]

# ANALYSIS INPUTS:
**Resume:**
{resume}

**Job Description:**
{job_description}

Please provide detailed, specific, and actionable recommendations with concrete examples.
"#;

/// Short visual report. Replace: {role_context}, {role}, {role_upper},
/// {analysis_date}, {resume}, {job_description}
pub const CONCISE_PROMPT_TEMPLATE: &str = r#"
You are an expert AI Career Consultant. Create a CONCISE, PROFESSIONAL resume analysis report with creative visual elements. Keep it focused and actionable - maximum 800 words total.

{role_context}

# 🎯 RESUME ANALYSIS REPORT
**Target Position**: {role} | **Analysis Date**: {analysis_date}

---

## 📊 EXECUTIVE SCORECARD

**OVERALL MATCH**: [X]%

```
PERFORMANCE BREAKDOWN:
├── Technical Skills    : [X]/10 ⭐⭐⭐⭐⭐⭐⭐⭐⚪⚪
├── Experience Match   : [X]/10 ⭐⭐⭐⭐⭐⭐⭐⚪⚪⚪
├── Achievement Impact : [X]/10 ⭐⭐⭐⭐⭐⭐⭐⭐⭐⚪
├── ATS Compatibility  : [X]/10 ⭐⭐⭐⭐⭐⭐⭐⭐⚪⚪
└── Professional Format: [X]/10 ⭐⭐⭐⭐⭐⭐⭐⭐⭐⭐
```

**🏆 COMPETITIVE POSITION**: [Strong Candidate/Needs Development/Excellent Match]

---

## 🔍 KEY FINDINGS

### ✅ STRENGTHS
- [Top 3 specific strengths with examples]

### ⚠️ IMPROVEMENT AREAS
- [Top 3 specific areas needing attention]

### 📈 MARKET POSITION
- [1-2 sentences on competitive positioning for {role}]

---

## ⚡ PRIORITY ACTION PLAN

### 🔥 IMMEDIATE WINS (24-48 Hours)
1. **[SPECIFIC ACTION]**: Add quantified result - "Increased [metric] by X%"
   - **Location**: Experience section, [specific bullet]
   - **Impact**: +[X]% match improvement

2. **[SPECIFIC ACTION]**: Include keywords: "[skill1], [skill2], [skill3]"
   - **Location**: Skills section & summary
   - **Impact**: +[X]% ATS score

3. **[SPECIFIC ACTION]**: Enhance summary with: "[specific language]"
   - **Location**: Top of resume
   - **Impact**: Stronger first impression

### 📋 CONTENT OPTIMIZATION
```
SKILLS UPGRADE:
├── ADD: [3-4 missing {role} skills]
├── REMOVE: [2-3 outdated skills]
└── REORGANIZE: [Priority order for {role}]

EXPERIENCE ENHANCEMENT:
├── QUANTIFY: [Add specific numbers/percentages]
├── CONTEXTUALIZE: [Include project scope]
└── IMPACT: [Connect to business outcomes]
```

---

## 🎯 SUCCESS METRICS

**TARGET IMPROVEMENTS:**
- ATS Score: 75%+ (Current: [X]%)
- Interview Rate: +25% improvement expected
- Response Time: <2 weeks average

**📅 IMPLEMENTATION TIMELINE:**
- Week 1: Complete all Priority Actions
- Week 2: Content optimization & formatting
- Week 3: Test optimized resume with 5+ applications

---

## 💡 {role_upper} SPECIFIC INSIGHTS

**🔑 KEY SUCCESS FACTORS:**
- [2-3 most important elements for {role} success]

**📈 MARKET TRENDS:**
- [1-2 current trends affecting {role} hiring]

**🚀 COMPETITIVE EDGE:**
- [Unique positioning strategy for {role}]

---

**⚡ QUICK WIN SUMMARY:** Focus on quantifying achievements, adding {role} keywords, and optimizing for ATS compatibility. Expected results: 25-30% improvement in application success rate.

---

# ANALYSIS INPUTS:
**Target Role**: {role}
**Resume Content**: {resume}
**Job Requirements**: {job_description}

IMPORTANT:
- Keep total response under 800 words
- Use REAL numbers for all scoring (X/10, X%)
- Include SPECIFIC, actionable recommendations
- Create VISUAL text elements (progress bars, trees, checklists)
- Focus on highest-impact improvements
- Include role-specific insights for {role}
- Use engaging, professional language
"#;
