//! Credential validation for the login flow.
//!
//! Checks run fail-fast in a fixed order: input shape, account existence,
//! active status, password match. The account lookup itself lives in
//! [`super::queries`]; these functions are pure over the fetched row.

use super::{AuthError, password};
use crate::models::user::User;

/// Validate the raw login input: both fields present and non-empty, email in
/// a minimal `local@domain` shape.
pub fn validate_shape<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), AuthError> {
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AuthError::MissingCredentials);
    };
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if !is_well_formed_email(email) {
        return Err(AuthError::MalformedEmail);
    }
    Ok((email, password))
}

/// Minimal email shape: exactly one `@` with non-empty text on both sides.
pub fn is_well_formed_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Check a fetched account against the supplied password.
///
/// Order matters: a missing account is reported before an inactive one, and
/// the password is only compared for active accounts.
pub fn check_account(account: Option<User>, supplied: &str) -> Result<User, AuthError> {
    let Some(user) = account else {
        return Err(AuthError::NotFound);
    };
    if !user.active {
        return Err(AuthError::Inactive);
    }
    if !password::verify_password(supplied, &user.password_hash)? {
        return Err(AuthError::BadCredentials);
    }
    Ok(user)
}
