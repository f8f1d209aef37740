use std::sync::Arc;

use anyhow::Context;
use gemini_chatbot::{config::Config, routes, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("info")?;

    let config = Config::from_env();
    let state = Arc::new(AppState::from_config(&config));

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        model = %config.model,
        configured = config.api_key.is_some(),
        "gemini relay listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
