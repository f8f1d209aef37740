// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{message::ErrorResponse, services::gemini::UpstreamError};

pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const NOT_CONFIGURED: &str = "Server is not configured with Gemini API key.";
pub const MESSAGE_REQUIRED: &str = "Message is required in the request body.";
pub const UPSTREAM_FAILED: &str =
    "Failed to get response from AI. Please check server logs for details.";

/// Errors returned by the relay route, each mapped to a status and a
/// `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("GEMINI_API_KEY is not configured")]
    NotConfigured,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotConfigured | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing text. Upstream detail stays in the server log.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::MethodNotAllowed => METHOD_NOT_ALLOWED,
            AppError::NotConfigured => NOT_CONFIGURED,
            AppError::BadRequest(m) => m,
            AppError::Upstream(_) => UPSTREAM_FAILED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.public_message().to_string(),
        });
        (self.status(), body).into_response()
    }
}
