//! # arcadia_api
//!
//! HTTP API library for Arcadia.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `arcadia_core::migrate::migrate()` which owns the migration
/// files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    arcadia_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
///
/// The `authenticate` layer runs on every request and resolves a bearer token
/// into a request-scoped principal (or rejects the request outright);
/// `require_auth` then guards the protected sub-router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register", post(auth::register_handler));

    // Protected routes (require an authenticated principal; admin-only
    // operations additionally check authorities in their handlers)
    let protected = Router::new()
        .route(
            "/users",
            get(users::list_users_handler).post(users::create_user_handler),
        )
        .route(
            "/users/{id}",
            get(users::get_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(handlers::not_found_handler)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ))
        .layer(cors)
        .with_state(state)
}
