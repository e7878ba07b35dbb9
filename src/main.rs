use axum::routing::post;
use axum::Router;
use tracing_subscriber::EnvFilter;

use medibot::api;
use medibot::config::Config;
use medibot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.base_url);
    tracing::info!("STT model: {} ({})", config.stt.model, config.stt.base_url);

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/chat", post(api::chat::chat))
        .route("/transcribe", post(api::transcribe::transcribe))
        .route("/reset", post(api::chat::reset))
        .route("/user/register", post(api::users::register))
        .route("/user/login", post(api::users::login))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
