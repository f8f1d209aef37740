// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use chat::{chat_handler, method_not_allowed};
use tower_http::trace::TraceLayer;

pub const CHAT_PATH: &str = "/api/gemini-chat";

pub fn create_router() -> Router<SharedState> {
    // The chat route answers only 200/400/405/500, so no body limit may
    // reject a request ahead of the handler.
    let chat = post(chat_handler)
        .fallback(method_not_allowed)
        .layer(DefaultBodyLimit::disable());

    Router::new()
        .route(CHAT_PATH, chat)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}
