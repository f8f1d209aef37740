use gemini_chatbot::routes::{CHAT_PATH, create_router};
use gemini_chatbot::services::gemini::{TextGenerator, UpstreamError};
use gemini_chatbot::state::AppState;
use gemini_chatbot::ui::relay_client::DEFAULT_FAILURE;
use gemini_chatbot::ui::{ChatState, HttpRelayClient, RelayClient, RelayError, Sender, Turn};

use async_trait::async_trait;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use std::sync::Arc;

struct Echo;

#[async_trait]
impl TextGenerator for Echo {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        Ok(format!("echo: {prompt}"))
    }
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn relay_url(state: AppState) -> String {
    let base = spawn(create_router().with_state(Arc::new(state))).await;
    format!("{base}{CHAT_PATH}")
}

#[tokio::test]
async fn test_send_through_live_relay() {
    let client = HttpRelayClient::new(relay_url(AppState::with_generator(Echo)).await);
    assert_eq!(client.send("Hello").await.unwrap(), "echo: Hello");
}

#[tokio::test]
async fn test_error_field_becomes_message() {
    let client = HttpRelayClient::new(relay_url(AppState::unconfigured()).await);
    assert_eq!(
        client.send("Hello").await,
        Err(RelayError::Rejected {
            status: 500,
            message: "Server is not configured with Gemini API key.".to_string(),
        })
    );
}

#[tokio::test]
async fn test_non_json_error_uses_default() {
    let base = spawn(Router::new().route(
        "/chat",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream proxy down") }),
    ))
    .await;
    let client = HttpRelayClient::new(format!("{base}/chat"));

    match client.send("Hello").await {
        Err(RelayError::Rejected { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, DEFAULT_FAILURE);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_relay_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpRelayClient::new(format!("http://{addr}{CHAT_PATH}"));
    let mut state = ChatState::new();
    state.set_input("Hello");
    assert!(state.submit(&client).await);

    assert_eq!(state.turns().len(), 2);
    assert_eq!(state.turns()[1].sender(), Sender::System);
    assert!(!state.is_busy());
}

#[tokio::test]
async fn test_chat_state_against_live_relay() {
    let client = HttpRelayClient::new(relay_url(AppState::with_generator(Echo)).await);
    let mut state = ChatState::new();

    state.set_input("Hello");
    assert!(state.submit(&client).await);

    assert_eq!(state.turns(), [Turn::user("Hello"), Turn::ai("echo: Hello")]);
}
