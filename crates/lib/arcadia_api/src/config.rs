//! API server configuration.

use arcadia_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret, injected into the token codec by reference.
    pub jwt_secret: String,
    /// Email for the seeded default admin account.
    pub admin_email: Option<String>,
    /// Password for the seeded default admin account.
    pub admin_password: Option<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                               |
    /// |------------------------------|---------------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:8080`                      |
    /// | `DATABASE_URL`               | `postgres://localhost:5432/arcadia`   |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated ephemeral value             |
    /// | `ADMIN_EMAIL`                | unset (no admin seeding)              |
    /// | `ADMIN_PASSWORD`             | unset (no admin seeding)              |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/arcadia".into()),
            jwt_secret: resolve_jwt_secret(),
            admin_email: std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }
}
