//! Integration tests for the request-authentication filter.
//!
//! Covers the two rejection paths the state machine keeps distinct: missing
//! credentials on a protected route (401 with a JSON message) versus a
//! present-but-invalid bearer token (bare 403, empty body).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use tower::ServiceExt;

use arcadia_api::{AppState, config::ApiConfig};
use arcadia_core::models::auth::TokenClaims;

const TEST_SECRET: &str = "test-secret";

fn test_app() -> axum::Router {
    let database_url = "postgres://127.0.0.1:9/arcadia_test";
    let pool = sqlx::PgPool::connect_lazy(database_url).expect("lazy pool");
    arcadia_api::router(AppState {
        pool,
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: database_url.into(),
            jwt_secret: TEST_SECRET.into(),
            admin_email: None,
            admin_password: None,
        },
    })
}

fn get_users(token: Option<&str>) -> Request<Body> {
    let builder = Request::builder().uri("/users");
    let builder = match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

fn signed_token(iss: &str, iat: i64, exp: i64, secret: &str) -> String {
    let claims = TokenClaims {
        id: 1,
        email: "user@example.com".to_string(),
        roles: vec!["ROLE_USER".to_string()],
        iss: iss.to_string(),
        iat,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode token")
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized_with_message() {
    let resp = test_app().oneshot(get_users(None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(
        json["message"],
        "Access denied. You need to log in to access this resource."
    );
}

#[tokio::test]
async fn garbage_token_is_rejected_with_bare_403() {
    let resp = test_app()
        .oneshot(get_users(Some("not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn expired_token_is_rejected_with_bare_403() {
    let old = Utc::now().timestamp() - 8 * 24 * 60 * 60;
    let token = signed_token("api-v1-auth", old, old + 7 * 24 * 60 * 60, TEST_SECRET);

    let resp = test_app().oneshot(get_users(Some(&token))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn token_signed_with_foreign_secret_is_rejected() {
    let now = Utc::now().timestamp();
    let token = signed_token("api-v1-auth", now, now + 3600, "someone-elses-secret");

    let resp = test_app().oneshot(get_users(Some(&token))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn token_with_wrong_issuer_is_rejected() {
    let now = Utc::now().timestamp();
    let token = signed_token("other-issuer", now, now + 3600, TEST_SECRET);

    let resp = test_app().oneshot(get_users(Some(&token))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn valid_token_with_unreachable_store_is_rejected_not_crashed() {
    // The pool points at a closed port; principal resolution fails and the
    // filter must reject rather than let the request through.
    let now = Utc::now().timestamp();
    let token = signed_token("api-v1-auth", now, now + 3600, TEST_SECRET);

    let resp = test_app().oneshot(get_users(Some(&token))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn anonymous_request_to_public_route_passes_the_filter() {
    // No Authorization header: the filter passes the request through and the
    // login validation answers, proving the codec was never consulted.
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"email": "not-an-email", "password": "pw123"}"#))
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
