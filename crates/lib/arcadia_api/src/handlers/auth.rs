//! Authentication request handlers.
//!
//! Tokens travel in the `Authorization` response header; bodies stay empty.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{LoginRequest, UserRequest};
use crate::services::auth;

/// `POST /auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let token = auth::login(
        &state.pool,
        body.email.as_deref(),
        body.password.as_deref(),
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok((
        StatusCode::OK,
        [(header::AUTHORIZATION, format!("Bearer {token}"))],
    ))
}

/// `POST /auth/register` — create a USER account and log it in.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<UserRequest>,
) -> AppResult<impl IntoResponse> {
    let token = auth::register(&state.pool, &body, state.config.jwt_secret.as_bytes()).await?;
    Ok((
        StatusCode::CREATED,
        [(header::AUTHORIZATION, format!("Bearer {token}"))],
    ))
}
