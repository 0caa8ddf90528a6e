//! Request and response payloads for the HTTP API.
//!
//! Kept separate from the domain models in `arcadia_core`; nothing here ever
//! carries a password hash.

use serde::{Deserialize, Serialize};

use arcadia_core::models::user::User;

/// `POST /auth/login` body. Fields are optional so that absent values reach
/// the credential validation (which owns the error message) instead of dying
/// in deserialization.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `POST /auth/register` and `POST /users` body.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// `PUT /users/{id}` body; absent fields stay untouched.
#[derive(Debug, Deserialize)]
pub struct UserPatchRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Pagination block for list responses.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub count: i64,
    pub pages: i64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Paginated account listing.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub info: PageInfo,
    pub results: Vec<UserResponse>,
}
