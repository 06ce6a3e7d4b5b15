//! Postgres pool and schema migrations

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tubely_core::Config;

/// Migrations are embedded at build time from the workspace `migrations/` dir.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Open the pool described by `config` and bring the schema up to date.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let pool = connect(config).await?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to apply database migrations")?;
    tracing::info!(migrations = MIGRATOR.iter().count(), "Database schema up to date");

    Ok(pool)
}

async fn connect(config: &Config) -> Result<PgPool> {
    let max_connections = config.db_max_connections();
    let acquire_timeout = Duration::from_secs(config.db_timeout_seconds());

    tracing::info!(max_connections, ?acquire_timeout, "Connecting to Postgres");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(config.database_url())
        .await
        .context("Failed to connect to database")
}
