//! Startup seeding for the default admin account.

use sqlx::PgPool;
use tracing::info;

use crate::auth::{AuthError, password, queries};
use crate::models::user::Role;

/// Create the configured default ADMIN account if no account exists for that
/// email. Runs once at startup; a no-op when the credentials are not
/// configured or the account is already present.
pub async fn ensure_admin(
    pool: &PgPool,
    email: Option<&str>,
    admin_password: Option<&str>,
) -> Result<(), AuthError> {
    let (Some(email), Some(admin_password)) = (email, admin_password) else {
        return Ok(());
    };
    if queries::find_user_by_email(pool, email).await?.is_some() {
        return Ok(());
    }
    let password_hash = password::hash_password(admin_password)?;
    queries::create_user(pool, email, "Admin", &password_hash, Role::Admin).await?;
    info!(email, "ADMIN user created");
    Ok(())
}
