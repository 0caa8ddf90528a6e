//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// JWT claims embedded in bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id.
    pub id: i64,
    /// Account email; used to resolve the principal on each request.
    pub email: String,
    /// Role-derived authorities (e.g. `["ROLE_ADMIN", "ROLE_USER"]`).
    pub roles: Vec<String>,
    /// Issuer.
    pub iss: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}
