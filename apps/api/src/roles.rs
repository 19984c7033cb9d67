//! Role catalog: static reference data for the target roles a resume can be
//! reviewed against. Read-only for the lifetime of the process.

use serde::Serialize;

/// Name of the sentinel role whose job description comes entirely from the user.
pub const CUSTOM_ROLE: &str = "Custom Role";

#[derive(Debug, Clone, Serialize)]
pub struct RoleProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub key_skills: &'static [&'static str],
    pub experience_focus: &'static [&'static str],
    pub industry_keywords: &'static [&'static str],
}

impl RoleProfile {
    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_ROLE
    }
}

pub static ROLES: &[RoleProfile] = &[
    RoleProfile {
        name: "Data Scientist",
        description: "Analyzes complex datasets to extract actionable insights, builds predictive models using machine learning algorithms, and creates data-driven solutions to solve business problems.",
        key_skills: &["Python", "R", "SQL", "Machine Learning", "Statistics", "Data Visualization", "Pandas", "NumPy", "Scikit-learn", "TensorFlow"],
        experience_focus: &["Model Development", "Data Analysis", "Statistical Modeling", "Feature Engineering", "A/B Testing"],
        industry_keywords: &["predictive modeling", "data mining", "neural networks", "deep learning", "data science", "analytics"],
    },
    RoleProfile {
        name: "Software Engineer",
        description: "Designs, develops, tests, and maintains software applications and systems using various programming languages and technologies.",
        key_skills: &["Java", "Python", "JavaScript", "C++", "React", "Node.js", "SQL", "Git", "Docker", "AWS"],
        experience_focus: &["Software Development", "Code Review", "System Architecture", "API Development", "Testing"],
        industry_keywords: &["software development", "programming", "coding", "debugging", "version control", "agile"],
    },
    RoleProfile {
        name: "Product Manager",
        description: "Drives product strategy, vision, and roadmap development while collaborating with cross-functional teams.",
        key_skills: &["Product Strategy", "Market Research", "User Experience Design", "Data Analysis", "Project Management", "Stakeholder Management"],
        experience_focus: &["Product Roadmapping", "Feature Prioritization", "User Research", "Market Analysis"],
        industry_keywords: &["product management", "product strategy", "user stories", "product roadmap", "market research"],
    },
    RoleProfile {
        name: "Digital Marketing Specialist",
        description: "Develops and executes comprehensive digital marketing strategies across multiple channels.",
        key_skills: &["SEO/SEM", "Google Analytics", "Social Media Marketing", "Content Marketing", "Email Marketing", "PPC Advertising"],
        experience_focus: &["Campaign Management", "Content Creation", "Social Media Strategy", "Performance Analysis"],
        industry_keywords: &["digital marketing", "SEO", "SEM", "social media", "content marketing", "conversion rates"],
    },
    RoleProfile {
        name: "Business Analyst",
        description: "Analyzes business processes and works with stakeholders to implement data-driven solutions.",
        key_skills: &["Business Analysis", "Requirements Gathering", "Process Mapping", "SQL", "Excel", "Power BI"],
        experience_focus: &["Process Analysis", "Requirements Documentation", "Data Analysis", "Process Improvement"],
        industry_keywords: &["business analysis", "process improvement", "requirements gathering", "business intelligence"],
    },
    RoleProfile {
        name: "UI/UX Designer",
        description: "Creates intuitive and engaging user interfaces and experiences for digital products.",
        key_skills: &["User Research", "Wireframing", "Prototyping", "Visual Design", "Figma", "Sketch", "Adobe Creative Suite", "User Testing"],
        experience_focus: &["User Experience Design", "User Interface Design", "User Research", "Prototyping", "Usability Testing"],
        industry_keywords: &["UI design", "UX design", "user experience", "user interface", "wireframing", "prototyping"],
    },
    RoleProfile {
        name: "DevOps Engineer",
        description: "Bridges the gap between development and operations teams by implementing CI/CD pipelines and managing infrastructure.",
        key_skills: &["CI/CD", "Docker", "Kubernetes", "AWS/Azure/GCP", "Terraform", "Jenkins", "Git", "Linux"],
        experience_focus: &["Infrastructure Management", "Automation", "CI/CD Pipeline Development", "Cloud Architecture"],
        industry_keywords: &["devops", "CI/CD", "infrastructure", "automation", "cloud computing", "containerization"],
    },
    RoleProfile {
        name: "Sales Representative",
        description: "Builds and maintains relationships with prospects and customers to drive revenue growth.",
        key_skills: &["Relationship Building", "Negotiation", "CRM Systems", "Lead Generation", "Sales Process", "Communication"],
        experience_focus: &["Lead Generation", "Customer Relationship Management", "Sales Presentations", "Contract Negotiation"],
        industry_keywords: &["sales", "business development", "lead generation", "customer acquisition", "revenue growth"],
    },
    RoleProfile {
        name: "Financial Analyst",
        description: "Analyzes financial data and creates comprehensive financial models to support strategic business decisions.",
        key_skills: &["Financial Modeling", "Excel", "Financial Analysis", "Forecasting", "Budgeting", "Valuation", "SQL"],
        experience_focus: &["Financial Modeling", "Budget Analysis", "Forecasting", "Investment Analysis", "Financial Reporting"],
        industry_keywords: &["financial analysis", "financial modeling", "budgeting", "forecasting", "investment analysis"],
    },
    RoleProfile {
        name: "Human Resources Manager",
        description: "Manages comprehensive HR functions including talent acquisition and employee relations.",
        key_skills: &["Recruitment", "Performance Management", "Employee Relations", "HR Policies", "Training & Development", "HRIS"],
        experience_focus: &["Talent Acquisition", "Employee Development", "Performance Management", "HR Policy Development"],
        industry_keywords: &["human resources", "talent acquisition", "employee relations", "performance management"],
    },
    RoleProfile {
        name: "Content Writer",
        description: "Creates compelling, engaging, and SEO-optimized written content across various platforms.",
        key_skills: &["Content Writing", "SEO Writing", "Research", "Editing", "Social Media Content", "Content Strategy"],
        experience_focus: &["Content Creation", "Content Strategy", "SEO Optimization", "Editorial Management"],
        industry_keywords: &["content writing", "content marketing", "SEO writing", "copywriting", "content strategy"],
    },
    RoleProfile {
        name: CUSTOM_ROLE,
        description: "Enter your own job description below",
        key_skills: &[],
        experience_focus: &[],
        industry_keywords: &[],
    },
];

/// Looks up a role by exact name.
pub fn find_role(name: &str) -> Option<&'static RoleProfile> {
    ROLES.iter().find(|r| r.name == name)
}

/// Looks up a role that carries catalog data, i.e. known and not custom.
pub fn find_standard_role(name: &str) -> Option<&'static RoleProfile> {
    find_role(name).filter(|r| !r.is_custom())
}

/// Joins the first `n` items with ", ".
pub(crate) fn join_first(items: &[&str], n: usize) -> String {
    items.iter().take(n).copied().collect::<Vec<_>>().join(", ")
}

/// The pre-filled job description offered for a role before the user edits it.
pub fn default_job_description(role: &RoleProfile) -> String {
    if role.is_custom() {
        return "Enter your custom job description here...\n\n\
                Include:\n\
                - Job title and company information\n\
                - Role responsibilities and requirements\n\
                - Required skills and qualifications\n\
                - Experience level needed"
            .to_string();
    }

    let name = role.name;
    let preferred = if role.key_skills.len() > 8 {
        role.key_skills[8..role.key_skills.len().min(12)].join(", ")
    } else {
        "additional relevant technologies".to_string()
    };

    format!(
        "**Job Title:** {name}

**Job Description:**
We are seeking a skilled {name} to join our growing team and contribute to our mission of delivering exceptional results.

**Key Responsibilities:**
• Lead and execute complex projects in {domain} domain
• Collaborate with cross-functional teams to deliver high-impact solutions
• Analyze requirements and develop innovative approaches to solve business challenges
• Drive continuous improvement and best practices implementation
• Mentor junior team members and contribute to knowledge sharing

**Required Qualifications:**
• Bachelor's degree in related field (Master's preferred)
• 3+ years of relevant professional experience
• Strong proficiency in: {skills}
• Experience with: {focus}
• Excellent communication and collaboration skills
• Strong analytical and problem-solving abilities

**Preferred Qualifications:**
• Advanced degree in relevant field
• Industry certifications
• Experience with: {preferred}
• Leadership experience
• Track record of successful project delivery

**What We Offer:**
• Competitive salary and comprehensive benefits package
• Professional development opportunities and career growth
• Collaborative and innovative work environment
• Flexible work arrangements and work-life balance

Please customize this template with specific details from the actual job posting you're applying for.",
        domain = name.to_lowercase(),
        skills = join_first(role.key_skills, 8),
        focus = join_first(role.experience_focus, 5),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eleven_roles_plus_custom() {
        assert_eq!(ROLES.len(), 12);
        assert_eq!(ROLES.iter().filter(|r| r.is_custom()).count(), 1);
    }

    #[test]
    fn test_custom_role_has_empty_lists() {
        let custom = find_role(CUSTOM_ROLE).unwrap();
        assert!(custom.key_skills.is_empty());
        assert!(custom.experience_focus.is_empty());
        assert!(custom.industry_keywords.is_empty());
    }

    #[test]
    fn test_find_standard_role_excludes_custom_and_unknown() {
        assert!(find_standard_role("Data Scientist").is_some());
        assert!(find_standard_role(CUSTOM_ROLE).is_none());
        assert!(find_standard_role("Astronaut").is_none());
    }

    #[test]
    fn test_role_names_are_unique() {
        let mut names: Vec<_> = ROLES.iter().map(|r| r.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ROLES.len());
    }

    #[test]
    fn test_join_first_truncates() {
        assert_eq!(join_first(&["a", "b", "c"], 2), "a, b");
        assert_eq!(join_first(&["a"], 5), "a");
        assert_eq!(join_first(&[], 5), "");
    }

    #[test]
    fn test_default_description_uses_role_data() {
        let role = find_role("Data Scientist").unwrap();
        let desc = default_job_description(role);
        assert!(desc.starts_with("**Job Title:** Data Scientist"));
        assert!(desc.contains("complex projects in data scientist domain"));
        assert!(desc.contains(
            "Strong proficiency in: Python, R, SQL, Machine Learning, Statistics, Data Visualization, Pandas, NumPy"
        ));
        // Skills beyond the first eight become preferred qualifications.
        assert!(desc.contains("Experience with: Scikit-learn, TensorFlow"));
    }

    #[test]
    fn test_default_description_short_skill_list_falls_back() {
        let role = find_role("Business Analyst").unwrap();
        let desc = default_job_description(role);
        assert!(desc.contains("Experience with: additional relevant technologies"));
    }

    #[test]
    fn test_custom_role_default_description_is_instructions() {
        let desc = default_job_description(find_role(CUSTOM_ROLE).unwrap());
        assert!(desc.starts_with("Enter your custom job description here..."));
    }
}
