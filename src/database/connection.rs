use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

const MAX_CONNECTIONS: u32 = 10;

/// Opens the connection pool shared by every request for the life of the process.
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::persistence("Failed to connect to database.", e))?;

    tracing::info!("✅ Connected to database");
    Ok(pool)
}

/// Applies the embedded migrations so both tables exist before first use.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("📂 Database schema is up to date");
    Ok(())
}
