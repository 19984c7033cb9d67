use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and generation setup.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-reviewer",
        "report_template": state.analyzer.template().to_string(),
        "llm_configured": state.config.groq_api_key.is_some(),
    }))
}
