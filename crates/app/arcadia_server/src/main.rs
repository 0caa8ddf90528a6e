//! Arcadia API server.
//!
//! Wires configuration, the connection pool, migrations, admin seeding, and
//! the HTTP listener.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use arcadia_api::{AppState, config::ApiConfig};

#[derive(Debug, Parser)]
#[command(name = "arcadia_server", version, about = "Arcadia API server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR")]
    bind_addr: Option<String>,
}

#[derive(Debug, Error)]
enum ServerError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("seed error: {0}")]
    Seed(#[from] arcadia_core::auth::AuthError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,arcadia_api=debug,arcadia_core=debug")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args = Args::parse();
    let mut config = ApiConfig::from_env();
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    tracing::info!("running database migrations");
    arcadia_api::migrate(&pool).await?;
    arcadia_core::seed::ensure_admin(
        &pool,
        config.admin_email.as_deref(),
        config.admin_password.as_deref(),
    )
    .await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");

    let state = AppState { pool, config };
    axum::serve(listener, arcadia_api::router(state)).await?;

    Ok(())
}
