//! Terminal chat front end for the Gemini relay.
//!
//! ```bash
//! gemini-chat --url http://localhost:3000/api/gemini-chat
//! ```
//!
//! Type a message and press enter. `/quit` or Ctrl-D exits.

use std::io::Write;

use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use gemini_chatbot::telemetry;
use gemini_chatbot::ui::chat_state::{PLACEHOLDER, THINKING};
use gemini_chatbot::ui::relay_client::DEFAULT_RELAY_URL;
use gemini_chatbot::ui::{ChatState, HttpRelayClient, RelayClient, Row, Sender, Submission};

#[derive(Debug, Parser)]
#[command(name = "gemini-chat", about = "Chat with Gemini through the relay endpoint")]
struct Args {
    /// Relay endpoint URL.
    #[arg(long, env = "GEMINI_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    url: String,
}

/// Prints turns as they are appended and the thinking indicator while a
/// call is in flight.
struct Renderer {
    shown: usize,
    last_revision: u64,
}

impl Renderer {
    fn new() -> Self {
        Self {
            shown: 0,
            last_revision: 0,
        }
    }

    fn render(&mut self, state: &ChatState, out: &mut impl Write) -> std::io::Result<()> {
        if state.revision() != self.last_revision {
            for turn in &state.turns()[self.shown..] {
                // User turns were already echoed by the prompt.
                match turn.sender() {
                    Sender::User => {}
                    Sender::Ai => writeln!(out, "AI: {}", turn.text())?,
                    Sender::System => writeln!(out, "!! {}", turn.text())?,
                }
            }
            self.shown = state.turns().len();
            self.last_revision = state.revision();
        }

        if let Some(Row::Thinking) = state.view(Some(1)).first() {
            write!(out, "{THINKING}")?;
        }
        out.flush()
    }

    fn clear_indicator(&self, out: &mut impl Write) -> std::io::Result<()> {
        write!(out, "\r\x1b[2K")?;
        out.flush()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("off")?;

    let args = Args::parse();
    let client = HttpRelayClient::new(args.url);
    let mut state = ChatState::new();
    let mut renderer = Renderer::new();
    let mut rl = DefaultEditor::new()?;
    let mut stdout = std::io::stdout();

    println!("{PLACEHOLDER} (relay: {})", client.url());
    println!("Type /quit to exit\n");

    loop {
        let line = match rl.readline("You: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        if line.trim() == "/quit" {
            break;
        }

        state.set_input(line.as_str());
        let Some(submission) = state.begin_submit() else {
            continue;
        };
        if let Err(err) = rl.add_history_entry(submission.message()) {
            tracing::debug!(error = %err, "could not record history entry");
        }

        renderer.render(&state, &mut stdout)?;
        run_cycle(&mut state, &client, submission).await;
        renderer.clear_indicator(&mut stdout)?;
        renderer.render(&state, &mut stdout)?;
    }

    println!("Goodbye!");
    Ok(())
}

async fn run_cycle(state: &mut ChatState, client: &HttpRelayClient, submission: Submission) {
    let outcome = client.send(submission.message()).await;
    state.finish(submission, outcome);
}
