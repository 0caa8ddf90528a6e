//! Request authentication: bearer-token resolution and route guards.
//!
//! Two distinct rejection paths, kept separate on purpose:
//! - [`authenticate`] runs on every request. A request without an
//!   `Authorization` header passes through anonymously; a request with a
//!   present-but-invalid token is aborted with a bare 403 and an empty body.
//! - [`require_auth`] guards protected routes and answers a missing
//!   authenticated context with a 401 JSON message.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use arcadia_core::auth::{AuthError, jwt, queries};
use arcadia_core::models::user::{Authority, User, authorities_for};

use crate::AppState;
use crate::error::AppError;

/// The request-scoped security context: resolved principal plus its
/// authority set. Lives in request extensions for one request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub authorities: &'static [Authority],
}

/// Axum middleware: resolves `Authorization: Bearer <token>` into a
/// [`CurrentUser`] extension, or rejects the request.
///
/// No downstream handler runs before the principal lookup has completed or
/// the request has been aborted.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        // Anonymous pass-through; downstream guards decide whether that is
        // acceptable for the route.
        return next.run(request).await;
    };

    let token = header.strip_prefix("Bearer ").unwrap_or(header);

    match resolve_principal(&state, token).await {
        Ok(current) => {
            request.extensions_mut().insert(current);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(error = %err, "token validation failed");
            // Bare 403 with no body: failure detail never leaks at this layer.
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

/// Verify the token and resolve the principal it names. The principal must
/// still exist and be active; the claims alone are never trusted for that.
async fn resolve_principal(state: &AppState, token: &str) -> Result<CurrentUser, AuthError> {
    let claims = jwt::verify_token(token, state.config.jwt_secret.as_bytes())?;
    let user = queries::find_user_by_email(&state.pool, &claims.email)
        .await?
        .filter(|u| u.active)
        .ok_or(AuthError::NotFound)?;
    let authorities = authorities_for(user.role);
    Ok(CurrentUser { user, authorities })
}

/// Guard for protected routes: rejects requests that reached the route
/// without an authenticated context.
pub async fn require_auth(request: Request, next: Next) -> Result<Response, AppError> {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Err(AppError::Unauthorized(
            "Access denied. You need to log in to access this resource.".into(),
        ));
    }
    Ok(next.run(request).await)
}

/// Authority check for role-gated operations.
pub fn require_authority(current: &CurrentUser, authority: Authority) -> Result<(), AppError> {
    if current.authorities.contains(&authority) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to access this resource".into(),
        ))
    }
}
