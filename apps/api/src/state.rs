use crate::analysis::pipeline::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Embedding scorer, report generator and template for every analysis.
    pub analyzer: Analyzer,
}
