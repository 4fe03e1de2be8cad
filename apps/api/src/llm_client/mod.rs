//! LLM Client — the single point of entry for all Gemini calls in gradpath.
//!
//! ARCHITECTURAL RULE: No other module may call the generateContent endpoint directly.
//! Flows depend on the `TextGenerator` trait; `GeminiClient` is the production backend.
//!
//! One call per prompt. No retry, no backoff: the caller decides what to do with a failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::Config;

pub mod extract;
pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API key environment variable '{var}' is not set")]
    MissingApiKey { var: String },
}

/// Anything that turns a prompt into free text. Carried in `AppState` as
/// `Arc<dyn TextGenerator>` so flows never see the transport.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Where the API key comes from.
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    /// Read the named variable from the process environment on every call.
    Env(String),
    Static(String),
}

impl ApiKeySource {
    fn resolve(&self) -> Result<String, LlmError> {
        match self {
            ApiKeySource::Env(var) => std::env::var(var)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| LlmError::MissingApiKey { var: var.clone() }),
            ApiKeySource::Static(key) => Ok(key.clone()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn single_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ContentPart>>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate. Empty text counts as absent.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Dispatcher for the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: ApiKeySource,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: ApiKeySource,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            ApiKeySource::Env(config.api_key_var.clone()),
            Duration::from_secs(config.llm_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    /// Issues exactly one POST and returns `candidates[0].content.parts[0].text`.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.resolve()?;

        // The key travels in the query string, so strip URLs from transport errors
        // before they can reach a log line.
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.as_str())])
            .json(&GenerateContentRequest::single_prompt(prompt))
            .send()
            .await
            .map_err(|e| LlmError::Http(e.without_url()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Gemini API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Http(e.without_url()))?;

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Gemini response body is not JSON: {e}");
            LlmError::MalformedResponse(format!("response body is not valid JSON: {e}"))
        })?;

        let text = parsed.first_text().ok_or_else(|| {
            error!("Gemini response lacks candidates[0].content.parts[0].text");
            LlmError::MalformedResponse(
                "missing candidates[0].content.parts[0].text".to_string(),
            )
        })?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}, prompt_chars={}, response_chars={}",
                usage.prompt_token_count,
                usage.candidates_token_count,
                prompt.len(),
                text.len()
            );
        }

        Ok(text.to_string())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Canned generator: records every prompt and replays a fixed outcome.
    pub struct CannedGenerator {
        reply: Result<String, (u16, String)>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16, message: &str) -> Self {
            Self {
                reply: Err((status, message.to_string())),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err((status, message)) => Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }
}
