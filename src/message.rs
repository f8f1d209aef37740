// src/message.rs
use serde::{Deserialize, Serialize};

/// Body accepted by the relay route. `message` is optional here so that a
/// missing field is reported as a 400 by the handler instead of a
/// deserialization rejection.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
