// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::gemini::{GeminiClient, TextGenerator};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// `None` when no credential was configured; the chat route then
    /// answers 500 to every POST.
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub fn with_generator(generator: impl TextGenerator + 'static) -> Self {
        Self::new(Some(Arc::new(generator)))
    }

    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    pub fn from_config(config: &Config) -> Self {
        match GeminiClient::from_config(config) {
            Some(client) => Self::with_generator(client),
            None => {
                tracing::error!(
                    "GEMINI_API_KEY environment variable is not set; chat requests will fail"
                );
                Self::unconfigured()
            }
        }
    }
}
