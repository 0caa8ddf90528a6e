//! Authentication and authorization logic.
//!
//! Provides credential validation, password hashing, the JWT codec, and the
//! account-store queries shared by the API layer and the server binary.

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

/// Authentication errors.
///
/// Each variant corresponds to one rejection outcome; the HTTP layer owns the
/// status mapping.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email format")]
    MalformedEmail,

    #[error("User not found")]
    NotFound,

    #[error("User inactive")]
    Inactive,

    #[error("Email or password do not match")]
    BadCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
