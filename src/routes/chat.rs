use axum::{Json, body::Bytes, extract::State};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::{AppError, MESSAGE_REQUIRED},
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

/// Relays one message to the upstream generator.
///
/// The credential is checked before the body so an unconfigured server
/// answers 500 whatever the client sent.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let generator = state.generator.clone().ok_or(AppError::NotConfigured)?;
    let message = parse_message(&body)?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("relay", %request_id, len = message.len());

    async move {
        match generator.generate(&message).await {
            Ok(response) => {
                tracing::info!("upstream replied");
                Ok(Json(ChatResponse { response }))
            }
            Err(err) => {
                tracing::error!(error = %err, "Error calling Gemini API");
                Err(AppError::Upstream(err))
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// The message text, untouched, when present and not blank.
fn parse_message(body: &[u8]) -> Result<String, AppError> {
    let request: ChatRequest = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest(MESSAGE_REQUIRED.to_string()))?;

    match request.message {
        Some(message) if !message.trim().is_empty() => Ok(message),
        _ => Err(AppError::BadRequest(MESSAGE_REQUIRED.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_surrounding_whitespace() {
        assert_eq!(parse_message(br#"{"message":"  hi \n"}"#).unwrap(), "  hi \n");
    }

    #[test]
    fn rejects_missing_blank_and_wrong_type() {
        for body in [
            &b""[..],
            b"not json",
            b"{}",
            br#"{"message":null}"#,
            br#"{"message":""}"#,
            br#"{"message":"   "}"#,
            br#"{"message":42}"#,
        ] {
            assert!(
                matches!(parse_message(body), Err(AppError::BadRequest(_))),
                "body {:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }
}
