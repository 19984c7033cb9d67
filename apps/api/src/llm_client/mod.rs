//! LLM Client: the single point of entry for report generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call the chat-completions API directly.
//! All LLM interactions MUST go through this module.
//!
//! One round trip per report: no retries, no streaming.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default Groq OpenAI-compatible endpoint. Overridable via `GROQ_API_URL`.
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all report generation.
pub const MODEL: &str = "llama-3.3-70b-versatile";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("GROQ_API_KEY not found")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl GenerationError {
    /// The message shown to end users, matching the wording of the web form.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::MissingCredential => {
                "❌ Error: GROQ_API_KEY not found. Please check your .env file.".to_string()
            }
            other => format!(
                "❌ Error generating report: {other}. Please check your API key and try again."
            ),
        }
    }
}

/// Decoding parameters sent alongside every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Anything that can turn a prompt into a raw report.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// False when no credential is configured; callers check this before
    /// attempting a generation.
    fn has_credential(&self) -> bool;

    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if it carries any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client used for report generation.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl LlmClient {
    pub fn new(
        api_key: Option<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            endpoint: endpoint.into(),
        })
    }

    /// Makes one call to the chat-completions API, returning the full response.
    pub async fn call(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<ChatResponse, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl ReportGenerator for LlmClient {
    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let response = self.call(prompt, params).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(GenerationError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    const PARAMS: GenerationParams = GenerationParams {
        temperature: 0.2,
        max_tokens: 3500,
    };

    /// Serves `app` on an ephemeral local port and returns its URL.
    async fn spawn_endpoint(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/chat/completions")
    }

    #[test]
    fn test_response_text_takes_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2}
        }))
        .unwrap();
        assert_eq!(response.text(), Some("first"));
    }

    #[test]
    fn test_response_text_blank_is_none() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "   "}}]
        }))
        .unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            GenerationError::MissingCredential.user_message(),
            "❌ Error: GROQ_API_KEY not found. Please check your .env file."
        );
        let api = GenerationError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(
            api.user_message(),
            "❌ Error generating report: API error (status 429): quota exceeded. Please check your API key and try again."
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_http() {
        // Unroutable endpoint: reaching the network would produce an Http error instead.
        let client = LlmClient::new(None, "http://127.0.0.1:9/never").unwrap();
        assert!(!client.has_credential());
        let err = client.generate("prompt", PARAMS).await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_params() {
        let captured: Arc<Mutex<Option<(Value, String)>>> = Arc::new(Mutex::new(None));
        let captured_in = Arc::clone(&captured);

        let app = Router::new().route(
            "/chat/completions",
            post(move |headers: axum::http::HeaderMap, Json(body): Json<Value>| {
                let captured_in = Arc::clone(&captured_in);
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *captured_in.lock().unwrap() = Some((body, auth));
                    Json(json!({
                        "choices": [{"message": {"content": "Technical Skills (4/5)"}}],
                        "usage": {"prompt_tokens": 12, "completion_tokens": 5}
                    }))
                }
            }),
        );
        let url = spawn_endpoint(app).await;

        let client = LlmClient::new(Some("test-key".to_string()), url).unwrap();
        let text = client.generate("analyze this", PARAMS).await.unwrap();
        assert_eq!(text, "Technical Skills (4/5)");

        let (body, auth) = captured.lock().unwrap().clone().unwrap();
        assert_eq!(auth, "Bearer test-key");
        assert_eq!(body["model"], MODEL);
        assert_eq!(body["max_tokens"], 3500);
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "analyze this");
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Invalid API Key"}})),
                )
            }),
        );
        let url = spawn_endpoint(app).await;

        let client = LlmClient::new(Some("bad-key".to_string()), url).unwrap();
        let err = client.generate("prompt", PARAMS).await.unwrap_err();
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_completion_is_an_error() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let url = spawn_endpoint(app).await;

        let client = LlmClient::new(Some("key".to_string()), url).unwrap();
        let err = client.generate("prompt", PARAMS).await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyContent));
    }
}
