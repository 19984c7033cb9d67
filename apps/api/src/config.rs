use anyhow::{Context, Result};

use crate::analysis::prompts::ReportTemplate;
use crate::llm_client::GROQ_API_URL;

/// Application configuration loaded from environment variables.
///
/// `GROQ_API_KEY` is deliberately optional here: a missing credential is a
/// per-request configuration error, not a startup failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub report_template: ReportTemplate,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let report_template = match std::env::var("REPORT_TEMPLATE") {
            Ok(raw) => raw
                .parse::<ReportTemplate>()
                .map_err(anyhow::Error::msg)
                .context("REPORT_TEMPLATE must be 'detailed' or 'concise'")?,
            Err(_) => ReportTemplate::default(),
        };

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_api_url: optional_env("GROQ_API_URL").unwrap_or_else(|| GROQ_API_URL.to_string()),
            report_template,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
