//! JWT token codec: minting and verification of bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::warn;

use super::AuthError;
use crate::models::auth::TokenClaims;
use crate::models::user::{User, authorities_for};

/// Issuer claim stamped into every token and required back at verification.
const ISSUER: &str = "api-v1-auth";

/// Token lifetime: 7 days.
const TOKEN_TTL_DAYS: i64 = 7;

/// Mint a signed bearer token (HS256) for an authenticated principal.
///
/// Claims carry the account id, email, and the role-derived authority list;
/// `iat`/`exp` arithmetic is UTC on both ends.
pub fn generate_token(user: &User, secret: &[u8]) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        id: user.id,
        email: user.email.clone(),
        roles: authorities_for(user.role)
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
        iss: ISSUER.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenCreation(format!("jwt encode: {e}")))
}

/// Verify a bearer token: signature, issuer, and expiry (no leeway).
///
/// Claims are only returned after full verification; expired and otherwise
/// invalid tokens fail with distinct errors.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.leeway = 0;
    decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
}

/// Resolve the signing secret: env var `JWT_SECRET` → `AUTH_SECRET` →
/// generated ephemeral value.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("AUTH_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    warn!("JWT_SECRET not set; using a generated secret, tokens will not survive a restart");
    secret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    const SECRET: &[u8] = b"unit-test-secret";

    fn sample_user(role: Role) -> User {
        User {
            id: 42,
            email: "user@example.com".to_string(),
            name: "Sample User".to_string(),
            password_hash: "$2a$10$unused".to_string(),
            role,
            active: true,
        }
    }

    #[test]
    fn mint_then_verify_round_trip() {
        let token = generate_token(&sample_user(Role::User), SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.roles, vec!["ROLE_USER"]);
        assert_eq!(claims.iss, "api-v1-auth");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn admin_token_carries_both_authorities() {
        let token = generate_token(&sample_user(Role::Admin), SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.roles, vec!["ROLE_ADMIN", "ROLE_USER"]);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let past = Utc::now().timestamp() - 8 * 24 * 60 * 60;
        let claims = TokenClaims {
            id: 1,
            email: "user@example.com".to_string(),
            roles: vec!["ROLE_USER".to_string()],
            iss: ISSUER.to_string(),
            iat: past,
            exp: past + TOKEN_TTL_DAYS * 24 * 60 * 60,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn tampered_signature_is_rejected_as_invalid() {
        let token = generate_token(&sample_user(Role::User), SECRET).unwrap();
        let (payload, signature) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<u8> = signature.bytes().collect();
        sig[10] = if sig[10] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{payload}.{}", String::from_utf8(sig).unwrap());
        assert!(matches!(
            verify_token(&tampered, SECRET),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn foreign_secret_is_rejected_as_invalid() {
        let token = generate_token(&sample_user(Role::User), b"other-secret").unwrap();
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn wrong_issuer_is_rejected_as_invalid() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: 1,
            email: "user@example.com".to_string(),
            roles: vec!["ROLE_USER".to_string()],
            iss: "someone-else".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AuthError::InvalidToken)
        ));
    }
}
