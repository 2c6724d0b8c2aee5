// src/routes/auth.rs
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::error::AppError;
use crate::message::{
    AuthResponse, LoginRequest, PreferenceUpdate, Preferences, RegisterRequest, User,
};
use crate::services::auth;
use crate::state::SharedState;

const SESSION_HEADER: &str = "x-session-token";

fn session_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)
}

pub async fn login_handler(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    state.metrics.record_route("login").await;
    let user = auth::login_user(&req.email, req.user_type);
    let token = state.sessions.create(user.clone()).await;
    tracing::info!(user = %user.email, "login");
    Ok(Json(AuthResponse { token, user }))
}

pub async fn register_handler(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.email.trim().is_empty() || req.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Name and email are required".to_string(),
        ));
    }

    state.metrics.record_route("register").await;
    let user = auth::register_user(req);
    let token = state.sessions.create(user.clone()).await;
    tracing::info!(user = %user.email, "registered");
    Ok(Json(AuthResponse { token, user }))
}

pub async fn logout_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = session_token(&headers)?;
    state.metrics.record_route("logout").await;
    state.sessions.remove(token).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<User>, AppError> {
    let token = session_token(&headers)?;
    state.metrics.record_route("me").await;
    let session = state.sessions.get(token).await.ok_or(AppError::Unauthorized)?;
    Ok(Json(session.user))
}

pub async fn update_preferences_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(update): Json<PreferenceUpdate>,
) -> Result<Json<Preferences>, AppError> {
    let token = session_token(&headers)?;
    state.metrics.record_route("preferences").await;
    let session = state
        .sessions
        .update(token, |session| {
            if let Some(theme) = update.theme {
                session.theme = theme;
            }
            if let Some(language) = &update.language {
                session.language = language.clone();
            }
        })
        .await
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(Preferences {
        theme: session.theme,
        language: session.language,
    }))
}
