// src/services/gemini.rs
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ApiKey, Config};

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Why an upstream generation call failed. Never shown to HTTP clients.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to Gemini failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("prompt blocked by Gemini: {0}")]
    Blocked(String),

    #[error("malformed Gemini response: {0}")]
    Malformed(String),

    #[error("Gemini returned no text")]
    Empty,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Extracts the reply text from a raw `generateContent` body.
fn extract_text(body: &[u8]) -> Result<String, UpstreamError> {
    let parsed: GenerateResponse =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Malformed(e.to_string()))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(UpstreamError::Blocked(reason));
    }

    let candidate = parsed.candidates.into_iter().next().ok_or(UpstreamError::Empty)?;
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_default();
        let blocked = matches!(
            reason.as_str(),
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT"
        );
        return Err(if blocked {
            UpstreamError::Blocked(reason)
        } else {
            UpstreamError::Empty
        });
    }

    Ok(text)
}

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: ApiKey,
    endpoint: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: ApiKey, api_base: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                model
            ),
        }
    }

    /// Returns `None` when the config carries no credential.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .api_key
            .clone()
            .map(|key| Self::new(key, &config.api_base, &config.model))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [TextPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        extract_text(&body)
    }
}
