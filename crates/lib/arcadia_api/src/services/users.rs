//! Account management service: validation, CRUD over the account store, and
//! pagination of listings.

use sqlx::PgPool;
use tracing::info;

use arcadia_core::auth::credentials::is_well_formed_email;
use arcadia_core::auth::{password, queries};
use arcadia_core::models::user::Role;

use crate::error::{AppError, AppResult};
use crate::models::{PageInfo, UserListResponse, UserPatchRequest, UserRequest, UserResponse};

/// Fixed page size for account listings.
pub const PAGE_SIZE: i64 = 10;

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

fn require_email<'a>(email: Option<&'a str>, errors: &mut Vec<String>) -> Option<&'a str> {
    match email {
        None => {
            errors.push("Email cannot be blank".to_string());
            None
        }
        Some(e) if e.trim().is_empty() => {
            errors.push("Email cannot be blank".to_string());
            None
        }
        Some(e) => optional_email(Some(e), errors),
    }
}

fn optional_email<'a>(email: Option<&'a str>, errors: &mut Vec<String>) -> Option<&'a str> {
    match email {
        Some(e) if !is_well_formed_email(e) => {
            errors.push("Email must be valid".to_string());
            None
        }
        other => other,
    }
}

fn require_name<'a>(name: Option<&'a str>, errors: &mut Vec<String>) -> Option<&'a str> {
    match name {
        None => {
            errors.push("Name cannot be blank".to_string());
            None
        }
        Some(n) if n.trim().is_empty() => {
            errors.push("Name cannot be blank".to_string());
            None
        }
        Some(n) => optional_name(Some(n), errors),
    }
}

fn optional_name<'a>(name: Option<&'a str>, errors: &mut Vec<String>) -> Option<&'a str> {
    match name {
        Some(n) if !(5..=100).contains(&n.chars().count()) => {
            errors.push("Name must be between 5 and 100 characters".to_string());
            None
        }
        other => other,
    }
}

fn require_password<'a>(password: Option<&'a str>, errors: &mut Vec<String>) -> Option<&'a str> {
    match password {
        None => {
            errors.push("Password cannot be blank".to_string());
            None
        }
        Some(p) if p.trim().is_empty() => {
            errors.push("Password cannot be blank".to_string());
            None
        }
        Some(p) => optional_password(Some(p), errors),
    }
}

fn optional_password<'a>(password: Option<&'a str>, errors: &mut Vec<String>) -> Option<&'a str> {
    match password {
        Some(p) if !(5..=30).contains(&p.chars().count()) => {
            errors.push("Password must be between 5 and 30 characters".to_string());
            None
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Create an account after full field validation (blank checks, sizes, email
/// shape, duplicate email). All failures are collected into one 400 payload.
pub async fn create_user(pool: &PgPool, body: &UserRequest, role: Role) -> AppResult<i64> {
    let mut errors = Vec::new();
    let email = require_email(body.email.as_deref(), &mut errors);
    let name = require_name(body.name.as_deref(), &mut errors);
    let pass = require_password(body.password.as_deref(), &mut errors);

    if let Some(email) = email {
        if queries::email_taken(pool, email, None).await? {
            errors.push("Email already registered".to_string());
        }
    }

    let (Some(email), Some(name), Some(pass)) = (email, name, pass) else {
        return Err(AppError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let password_hash = password::hash_password(pass)?;
    let id = queries::create_user(pool, email, name, &password_hash, role).await?;
    info!(id, email, "user account created");
    Ok(id)
}

/// Fetch one active account.
pub async fn get_user(pool: &PgPool, id: i64) -> AppResult<UserResponse> {
    if id < 1 {
        return Err(AppError::BadRequest("Invalid ID".into()));
    }
    let user = queries::get_user_by_id(pool, id)
        .await?
        .filter(|u| u.active)
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {id}")))?;
    Ok(UserResponse::from(&user))
}

/// Paginated listing of active accounts with an optional name filter.
pub async fn list_users(
    pool: &PgPool,
    page: i64,
    name: Option<&str>,
) -> AppResult<UserListResponse> {
    if page < 1 {
        return Err(AppError::BadRequest(
            "Page number must be greater than 0".into(),
        ));
    }
    let count = queries::count_active_users(pool, name).await?;
    let users = queries::list_active_users(pool, (page - 1) * PAGE_SIZE, PAGE_SIZE, name).await?;

    let pages = (count as u64).div_ceil(PAGE_SIZE as u64) as i64;
    let next = (page < pages).then(|| format!("/users?page={}", page + 1));
    let prev = (page > 1).then(|| format!("/users?page={}", page - 1));

    Ok(UserListResponse {
        info: PageInfo {
            count,
            pages,
            next,
            prev,
        },
        results: users.iter().map(UserResponse::from).collect(),
    })
}

/// Partial update of email/name/password; provided fields are validated, the
/// password is re-hashed, absent fields stay untouched.
pub async fn update_user(pool: &PgPool, id: i64, body: &UserPatchRequest) -> AppResult<()> {
    if id < 1 {
        return Err(AppError::BadRequest("Invalid ID".into()));
    }
    let existing = queries::get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {id}")))?;

    let mut errors = Vec::new();
    let email = optional_email(body.email.as_deref(), &mut errors);
    let name = optional_name(body.name.as_deref(), &mut errors);
    let pass = optional_password(body.password.as_deref(), &mut errors);

    if let Some(email) = email {
        if queries::email_taken(pool, email, Some(existing.id)).await? {
            errors.push("Email already registered".to_string());
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let password_hash = pass.map(password::hash_password).transpose()?;
    queries::update_user(pool, id, email, name, password_hash.as_deref()).await?;
    info!(id, "user account updated");
    Ok(())
}

/// Soft delete: the account is marked inactive, never removed.
pub async fn delete_user(pool: &PgPool, id: i64) -> AppResult<()> {
    if id < 1 {
        return Err(AppError::BadRequest("Invalid ID".into()));
    }
    queries::get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {id}")))?;
    queries::soft_delete_user(pool, id).await?;
    info!(id, "user account deactivated");
    Ok(())
}
