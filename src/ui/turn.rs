use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
    /// Relay or transport failure surfaced to the user.
    System,
}

/// One entry of the transcript. Fields are private so a turn cannot change
/// after it is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    text: String,
    sender: Sender,
}

impl Turn {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Ai)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(text, Sender::System)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }
}
