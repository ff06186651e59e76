/// LLM Client: the single point of entry for all generative-AI calls in JobScout.
///
/// Every component talks to the model through the `GenerativeModel` trait; the
/// production implementation is `GeminiClient`, constructed once at startup with the
/// injected API key and shared via `AppState`.
///
/// No retries: a failed call surfaces immediately and the user re-triggers the action.
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::job::SourceCitation;

pub mod prompts;
pub mod schema;
pub mod wire;

use wire::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode model service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One piece of the user turn sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    /// Base64-encoded document bytes.
    InlineData { mime_type: String, data: String },
}

/// A provider-neutral generation request.
///
/// `response_schema` switches the call to structured-output mode; `web_search`
/// enables search grounding, whose citations come back on the response.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub parts: Vec<Part>,
    pub response_schema: Option<Value>,
    pub web_search: bool,
}

impl ModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parts: Vec::new(),
            response_schema: None,
            web_search: false,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text(text.into()));
        self
    }

    pub fn inline_data(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.parts.push(Part::InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        });
        self
    }

    pub fn structured(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    /// All text parts joined with newlines.
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelResponse {
    pub text: String,
    /// Present only for web-search grounded calls.
    pub citations: Vec<SourceCitation>,
}

/// The model trait. Carried in `AppState` as `Arc<dyn GenerativeModel>` so tests can
/// substitute a scripted implementation.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, LlmError>;
}

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_key,
            api_base,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, LlmError> {
        let body = GenerateContentRequest::from(request);

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                request.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }
        if let Some(reason) = parsed.finish_reason().filter(|r| *r != "STOP") {
            warn!("LLM call on {} finished with reason {reason}", request.model);
        }

        parsed.into_model_response()
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    type Responder = dyn Fn(&ModelRequest) -> Result<ModelResponse, LlmError> + Send + Sync;

    /// In-process model that answers from a closure and records every request.
    pub struct ScriptedModel {
        responder: Box<Responder>,
        requests: Mutex<Vec<ModelRequest>>,
    }

    impl ScriptedModel {
        pub fn new<F>(responder: F) -> Self
        where
            F: Fn(&ModelRequest) -> Result<ModelResponse, LlmError> + Send + Sync + 'static,
        {
            Self {
                responder: Box::new(responder),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Always answers with `text` and no citations.
        pub fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self::new(move |_| {
                Ok(ModelResponse {
                    text: text.clone(),
                    citations: Vec::new(),
                })
            })
        }

        pub fn failing() -> Self {
            Self::new(|_| {
                Err(LlmError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                })
            })
        }

        pub fn requests(&self) -> Vec<ModelRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            (self.responder)(request)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new("k".into(), "https://example.test/v1beta".into()).unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-pro"),
            "https://example.test/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_prompt_text_skips_inline_data() {
        let request = ModelRequest::new("m")
            .text("first")
            .inline_data("image/png", "AAAA")
            .text("second");
        assert_eq!(request.prompt_text(), "first\nsecond");
    }
}
