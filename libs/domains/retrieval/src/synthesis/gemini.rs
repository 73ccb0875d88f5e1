//! Google Gemini `generateContent` synthesizer.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_timeout_secs};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::AnswerSynthesizer;
use super::prompt::{MAX_CONTEXT_RECORDS, NO_RESULTS_SENTINEL, build_prompt};
use crate::error::{RetrievalError, RetrievalResult};
use crate::models::SanitizedRecord;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Gemini synthesis configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    /// Records beyond this index are left out of the prompt
    pub max_context_records: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            max_context_records: MAX_CONTEXT_RECORDS,
        }
    }
}

impl GeminiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl FromEnv for GeminiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_context_records =
            env_parse("SYNTHESIS_MAX_CONTEXT_RECORDS", MAX_CONTEXT_RECORDS)?;
        if max_context_records == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SYNTHESIS_MAX_CONTEXT_RECORDS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            base_url: env_or_default("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            model: env_or_default("GEMINI_MODEL", DEFAULT_MODEL),
            timeout: env_timeout_secs("GEMINI_TIMEOUT_SECS", 30)?,
            max_context_records,
        })
    }
}

/// Gemini-backed answer synthesizer
pub struct GeminiSynthesizer {
    client: Client,
    config: GeminiConfig,
}

impl GeminiSynthesizer {
    pub fn new(config: GeminiConfig) -> RetrievalResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RetrievalError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl GenerateContentResponse {
    fn into_text(self) -> RetrievalResult<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(RetrievalError::SynthesisUnavailable(format!(
                "prompt blocked by the model ({})",
                reason
            )));
        }

        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            RetrievalError::SynthesisUnavailable("model returned no candidates".to_string())
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(RetrievalError::SynthesisUnavailable(format!(
                "model returned no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl AnswerSynthesizer for GeminiSynthesizer {
    async fn synthesize(
        &self,
        query: &str,
        records: &[SanitizedRecord],
        credential: &str,
    ) -> RetrievalResult<String> {
        if credential.trim().is_empty() {
            return Err(RetrievalError::InvalidCredential(
                "gemini_api_key must not be empty when provided".to_string(),
            ));
        }

        if records.is_empty() {
            return Ok(NO_RESULTS_SENTINEL.to_string());
        }

        let prompt = build_prompt(query, records, self.config.max_context_records);
        let request = GenerateContentRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: &prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", credential)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    RetrievalError::InvalidCredential(
                        "credential is not a valid HTTP header value".to_string(),
                    )
                } else if e.is_timeout() {
                    RetrievalError::SynthesisUnavailable(format!(
                        "request timed out after {:?}",
                        self.config.timeout
                    ))
                } else {
                    RetrievalError::SynthesisUnavailable(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&raw)
                .map(|b| b.error.message)
                .unwrap_or(raw);
            warn!(%status, "Generative model returned an error status");
            return Err(RetrievalError::SynthesisUnavailable(format!(
                "model returned {}: {}",
                status, message
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            RetrievalError::SynthesisUnavailable(format!("invalid response body: {}", e))
        })?;

        let text = body.into_text()?;
        debug!(
            model = %self.config.model,
            context_records = records.len().min(self.config.max_context_records),
            answer_chars = text.len(),
            "Answer synthesized"
        );
        Ok(text)
    }
}
