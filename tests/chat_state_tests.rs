use gemini_chatbot::ui::{ChatState, RelayClient, RelayError, Sender, Turn};

use async_trait::async_trait;
use std::sync::Mutex;

/// Relay double that replays scripted outcomes and records what it was sent.
struct ScriptedRelay {
    outcomes: Mutex<Vec<Result<String, RelayError>>>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedRelay {
    fn new(mut outcomes: Vec<Result<String, RelayError>>) -> Self {
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayClient for ScriptedRelay {
    async fn send(&self, message: &str) -> Result<String, RelayError> {
        self.sent.lock().unwrap().push(message.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(RelayError::Transport("script exhausted".into())))
    }
}

#[tokio::test]
async fn test_blank_input_is_noop() {
    let relay = ScriptedRelay::new(vec![]);
    let mut state = ChatState::new();

    for input in ["", "   ", "\n\t"] {
        state.set_input(input);
        assert!(!state.can_submit());
        assert!(!state.submit(&relay).await);
    }

    assert!(state.turns().is_empty());
    assert_eq!(state.revision(), 0);
    assert!(relay.sent().is_empty());
}

#[tokio::test]
async fn test_hello_round_trip() {
    let relay = ScriptedRelay::new(vec![Ok("Hi there".to_string())]);
    let mut state = ChatState::new();

    state.set_input("Hello");
    let submission = state.begin_submit().unwrap();

    assert_eq!(state.turns(), [Turn::user("Hello")]);
    assert!(state.is_busy());
    assert_eq!(state.input(), "");
    assert!(!state.set_input("typing while busy"));

    let outcome = relay.send(submission.message()).await;
    state.finish(submission, outcome);

    assert_eq!(state.turns(), [Turn::user("Hello"), Turn::ai("Hi there")]);
    assert_eq!(state.turns()[1].sender(), Sender::Ai);
    assert!(!state.is_busy());
    assert!(state.set_input("next"));
}

#[tokio::test]
async fn test_network_failure_appends_one_system_turn() {
    let relay = ScriptedRelay::new(vec![Err(RelayError::Transport(
        "error sending request".into(),
    ))]);
    let mut state = ChatState::new();

    state.set_input("Hello");
    assert!(state.submit(&relay).await);
    let before_reply = 1;

    assert_eq!(state.turns().len(), before_reply + 1);
    let last = state.turns().last().unwrap();
    assert_eq!(last.sender(), Sender::System);
    assert_eq!(
        last.text(),
        "Error: error sending request. Please check your backend and API key."
    );
    assert_eq!(state.count_by(Sender::System), 1);
    assert!(!state.is_busy());
}

#[tokio::test]
async fn test_rejected_reply_uses_error_field() {
    let relay = ScriptedRelay::new(vec![Err(RelayError::Rejected {
        status: 500,
        message: "Server is not configured with Gemini API key.".into(),
    })]);
    let mut state = ChatState::new();

    state.set_input("Hello");
    state.submit(&relay).await;

    let last = state.turns().last().unwrap();
    assert_eq!(last.sender(), Sender::System);
    assert!(last.text().contains("Server is not configured with Gemini API key."));
}

#[tokio::test]
async fn test_same_message_twice_is_not_deduplicated() {
    let relay = ScriptedRelay::new(vec![Ok("one".into()), Ok("two".into())]);
    let mut state = ChatState::new();

    for _ in 0..2 {
        state.set_input("ping");
        assert!(state.submit(&relay).await);
    }

    assert_eq!(relay.sent(), vec!["ping".to_string(), "ping".to_string()]);
    assert_eq!(state.count_by(Sender::User), 2);
    assert_eq!(
        state.turns(),
        [
            Turn::user("ping"),
            Turn::ai("one"),
            Turn::user("ping"),
            Turn::ai("two"),
        ]
    );
    assert_eq!(state.revision(), 4);
}
