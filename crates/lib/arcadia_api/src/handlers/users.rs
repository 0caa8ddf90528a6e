//! Account management request handlers.

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use arcadia_core::models::user::{Authority, Role};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::{CurrentUser, require_authority};
use crate::models::{UserListResponse, UserPatchRequest, UserRequest, UserResponse};
use crate::services::users;

fn default_page() -> i64 {
    1
}

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    pub name: Option<String>,
}

/// `GET /users` — paginated listing of active accounts.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<UserListResponse>> {
    let response = users::list_users(&state.pool, query.page, query.name.as_deref()).await?;
    Ok(Json(response))
}

/// `GET /users/{id}` — one active account.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = users::get_user(&state.pool, id).await?;
    Ok(Json(user))
}

/// `POST /users` — create an account. Admin only.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<UserRequest>,
) -> AppResult<StatusCode> {
    require_authority(&current, Authority::RoleAdmin)?;
    users::create_user(&state.pool, &body, Role::User).await?;
    Ok(StatusCode::CREATED)
}

/// `PUT /users/{id}` — partial update of email/name/password.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UserPatchRequest>,
) -> AppResult<StatusCode> {
    users::update_user(&state.pool, id, &body).await?;
    Ok(StatusCode::OK)
}

/// `DELETE /users/{id}` — soft delete. Admin only.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_authority(&current, Authority::RoleAdmin)?;
    users::delete_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
