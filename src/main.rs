use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tower_http::cors::CorsLayer;

use healthbot_backend::config::AppConfig;
use healthbot_backend::routes;
use healthbot_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set, chat will answer from the keyword table only");
    }

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config)?);

    // Background sweep for idle sessions.
    let purge_state = state.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(60));
        loop {
            tick.tick().await;
            let purged = purge_state.sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "expired sessions removed");
            }
        }
    });

    let cors = CorsLayer::very_permissive();
    let app = routes::create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    tracing::info!("health assistant backend listening on http://{bind_addr}");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
