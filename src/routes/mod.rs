// src/routes/mod.rs
pub mod auth;
pub mod chat;
pub mod symptoms;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::services::metrics::MetricsData;
use crate::state::SharedState;

pub fn create_router(state: SharedState) -> Router {
    let admin_routes = Router::new()
        .route("/metrics", get(get_metrics_handler))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth));

    Router::new()
        .route("/api/chat", post(chat::chat_handler))
        .route("/api/symptoms/analyze", post(symptoms::analyze_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/preferences", put(auth::update_preferences_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn admin_auth(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Admin routes stay locked unless a key is configured.
    match (state.config.admin_key.as_deref(), req.headers().get("x-admin-key")) {
        (Some(expected), Some(got)) if got.as_bytes() == expected.as_bytes() => {
            Ok(next.run(req).await)
        }
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
