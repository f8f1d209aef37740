use async_trait::async_trait;
use thiserror::Error;

use crate::message::{ChatRequest, ChatResponse, ErrorResponse};

pub const DEFAULT_RELAY_URL: &str = "http://localhost:3000/api/gemini-chat";
pub const DEFAULT_FAILURE: &str = "Failed to get response from AI";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The relay could not be reached.
    #[error("{0}")]
    Transport(String),

    /// The relay answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx answer without a `response` field.
    #[error("unexpected relay response: {0}")]
    Decode(String),
}

/// Sends one message to the relay endpoint and yields the reply text.
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, RelayError>;
}

#[derive(Clone, Debug)]
pub struct HttpRelayClient {
    http: reqwest::Client,
    url: String,
}

impl HttpRelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpRelayClient {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_URL)
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, message: &str) -> Result<String, RelayError> {
        let request = ChatRequest {
            message: Some(message.to_string()),
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE.to_string());
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<ChatResponse>(&body)
            .map(|r| r.response)
            .map_err(|e| RelayError::Decode(e.to_string()))
    }
}
