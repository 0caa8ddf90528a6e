//! Request handlers.

pub mod auth;
pub mod users;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Fallback for unknown routes.
pub async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "The requested route was not found."})),
    )
}
