//! Submit state machine for the chat client.
//!
//! One cycle is `idle -> busy -> idle`. [`ChatState::begin_submit`] hands out
//! a [`Submission`] token and [`ChatState::finish`] consumes it, so a cycle
//! leaves `busy` exactly once and no second submission starts before that.

use super::relay_client::{RelayClient, RelayError};
use super::turn::{Sender, Turn};

pub const PLACEHOLDER: &str = "Gemini Personal Assistant";
pub const THINKING: &str = "AI is thinking...";

/// Proof that a submission is in flight. Not `Clone`: only one `finish` per
/// cycle.
#[derive(Debug)]
#[must_use = "a submission must be passed to ChatState::finish"]
pub struct Submission {
    message: String,
}

impl Submission {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One rendered row of the transcript view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row<'a> {
    /// Shown only while the transcript is empty.
    Placeholder,
    Turn(&'a Turn),
    /// Transient indicator while a relay call is outstanding.
    Thinking,
}

#[derive(Debug, Default)]
pub struct ChatState {
    turns: Vec<Turn>,
    input: String,
    busy: bool,
    revision: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Bumped whenever a turn is appended; a view scrolls to the end when
    /// it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the input text. Input is disabled while busy.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if self.busy {
            return false;
        }
        self.input = text.into();
        true
    }

    pub fn can_submit(&self) -> bool {
        !self.busy && !self.input.trim().is_empty()
    }

    /// Starts a cycle: appends the user turn, clears input and goes busy.
    /// Returns `None` without touching anything when the input is blank or
    /// a cycle is already running.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }

        let message = std::mem::take(&mut self.input);
        self.push(Turn::user(message.clone()));
        self.busy = true;

        Some(Submission { message })
    }

    /// Ends a cycle with the relay outcome and returns to idle.
    pub fn finish(&mut self, _submission: Submission, outcome: Result<String, RelayError>) {
        let turn = match outcome {
            Ok(text) => Turn::ai(text),
            Err(err) => {
                tracing::warn!(error = %err, "relay call failed");
                Turn::system(format!(
                    "Error: {err}. Please check your backend and API key."
                ))
            }
        };
        self.push(turn);
        self.busy = false;
    }

    /// Runs a whole cycle against `client`. Returns `false` when the input
    /// was not submittable.
    pub async fn submit<C>(&mut self, client: &C) -> bool
    where
        C: RelayClient + ?Sized,
    {
        let Some(submission) = self.begin_submit() else {
            return false;
        };
        let outcome = client.send(submission.message()).await;
        self.finish(submission, outcome);
        true
    }

    /// Rows to draw. With `height`, only the newest `height` rows are kept,
    /// which keeps the view scrolled to the latest turn.
    pub fn view(&self, height: Option<usize>) -> Vec<Row<'_>> {
        let mut rows: Vec<Row<'_>> = Vec::with_capacity(self.turns.len() + 1);
        if self.turns.is_empty() {
            rows.push(Row::Placeholder);
        }
        rows.extend(self.turns.iter().map(Row::Turn));
        if self.busy {
            rows.push(Row::Thinking);
        }

        if let Some(height) = height {
            let skip = rows.len().saturating_sub(height);
            rows = rows.split_off(skip);
        }
        rows
    }

    pub fn count_by(&self, sender: Sender) -> usize {
        self.turns.iter().filter(|t| t.sender() == sender).count()
    }

    fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.revision += 1;
    }
}
