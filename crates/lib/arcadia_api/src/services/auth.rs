//! Authentication service — login and register flows.

use sqlx::PgPool;
use tracing::info;

use arcadia_core::auth::{credentials, jwt, queries};
use arcadia_core::models::user::Role;

use crate::error::AppResult;
use crate::models::UserRequest;
use crate::services::users;

/// Authenticate with email + password and mint a bearer token.
///
/// Checks run fail-fast: input shape, account existence, active status,
/// password match. The caller only ever sees the opaque token string.
pub async fn login(
    pool: &PgPool,
    email: Option<&str>,
    password: Option<&str>,
    jwt_secret: &[u8],
) -> AppResult<String> {
    let (email, password) = credentials::validate_shape(email, password)?;
    let account = queries::find_user_by_email(pool, email).await?;
    let user = credentials::check_account(account, password)?;
    let token = jwt::generate_token(&user, jwt_secret)?;
    info!(email, "login succeeded");
    Ok(token)
}

/// Register a new USER account, then immediately log it in.
pub async fn register(pool: &PgPool, body: &UserRequest, jwt_secret: &[u8]) -> AppResult<String> {
    users::create_user(pool, body, Role::User).await?;
    login(
        pool,
        body.email.as_deref(),
        body.password.as_deref(),
        jwt_secret,
    )
    .await
}
