//! Account-store queries.

use sqlx::PgPool;

use super::AuthError;
use crate::models::user::{Role, User};

type UserRow = (i64, String, String, String, String, bool);

fn row_to_user((id, email, name, password_hash, role, active): UserRow) -> Result<User, AuthError> {
    let role =
        Role::parse(&role).ok_or_else(|| AuthError::Internal(format!("unknown role: {role}")))?;
    Ok(User {
        id,
        email,
        name,
        password_hash,
        role,
        active,
    })
}

/// Fetch an account by email (exact, case-sensitive match).
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, name, password_hash, role::text, active \
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    row.map(row_to_user).transpose()
}

/// Fetch an account by id, active or not.
pub async fn get_user_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, name, password_hash, role::text, active \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(row_to_user).transpose()
}

/// Check whether an email is already registered, optionally ignoring one row
/// (the row being updated).
pub async fn email_taken(
    pool: &PgPool,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<bool, AuthError> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND ($2::bigint IS NULL OR id <> $2))",
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(taken)
}

/// Create a new account, returning its id.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password_hash: &str,
    role: Role,
) -> Result<i64, AuthError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, name, password_hash, role) \
         VALUES ($1, $2, $3, $4::user_role) RETURNING id",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// List a page of active accounts ordered by id, with an optional
/// case-insensitive name filter.
pub async fn list_active_users(
    pool: &PgPool,
    offset: i64,
    limit: i64,
    name: Option<&str>,
) -> Result<Vec<User>, AuthError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, name, password_hash, role::text, active \
         FROM users \
         WHERE active AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%') \
         ORDER BY id LIMIT $2 OFFSET $3",
    )
    .bind(name)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(row_to_user).collect()
}

/// Count active accounts matching the optional name filter.
pub async fn count_active_users(pool: &PgPool, name: Option<&str>) -> Result<i64, AuthError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM users \
         WHERE active AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Partial update: absent fields keep their stored value.
pub async fn update_user(
    pool: &PgPool,
    id: i64,
    email: Option<&str>,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> Result<(), AuthError> {
    sqlx::query(
        "UPDATE users SET \
           email = COALESCE($2::text, email), \
           name = COALESCE($3::text, name), \
           password_hash = COALESCE($4::text, password_hash) \
         WHERE id = $1",
    )
    .bind(id)
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(())
}

/// Soft delete: the row stays, the account stops resolving.
pub async fn soft_delete_user(pool: &PgPool, id: i64) -> Result<(), AuthError> {
    sqlx::query("UPDATE users SET active = FALSE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
