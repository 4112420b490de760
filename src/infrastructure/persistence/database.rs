//! Connection pool setup and backend dispatch.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{PgPool, SqlitePool};

use super::{PgLinkRepository, PgStatsRepository, SqliteLinkRepository, SqliteStatsRepository};
use crate::config::{Config, DatabaseBackend, mask_connection_string};
use crate::domain::repositories::{LinkRepository, StatsRepository};

/// A connected pool for one of the supported engines.
#[derive(Debug, Clone)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Connects using the pool settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is unsupported or the connection fails.
    pub async fn connect(config: &Config) -> Result<Self> {
        let url = &config.database_url;
        let backend = DatabaseBackend::from_url(url).with_context(|| {
            format!(
                "Unsupported database URL: {}",
                mask_connection_string(url)
            )
        })?;
        let acquire_timeout = Duration::from_secs(config.db_connect_timeout);

        let database = match backend {
            DatabaseBackend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(acquire_timeout)
                    .connect(url)
                    .await
                    .context("Failed to connect to PostgreSQL")?;
                Database::Postgres(pool)
            }
            DatabaseBackend::Sqlite => {
                let pool = SqlitePoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(acquire_timeout)
                    .connect(url)
                    .await
                    .context("Failed to open SQLite database")?;
                Database::Sqlite(pool)
            }
        };

        tracing::info!(backend = backend.as_str(), "Connected to database");
        Ok(database)
    }

    /// Opens a private in-memory SQLite database with the schema applied.
    ///
    /// A single connection that never expires keeps the database alive for the
    /// lifetime of the pool.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory SQLite database")?;

        let database = Database::Sqlite(pool);
        database.migrate().await?;
        Ok(database)
    }

    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Database::Postgres(_) => DatabaseBackend::Postgres,
            Database::Sqlite(_) => DatabaseBackend::Sqlite,
        }
    }

    /// Applies the embedded migrations for this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        let result = match self {
            Database::Postgres(pool) => sqlx::migrate!("./migrations/postgres").run(pool).await,
            Database::Sqlite(pool) => sqlx::migrate!("./migrations/sqlite").run(pool).await,
        };

        result.context("Failed to run database migrations")
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        match self {
            Database::Postgres(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
            Database::Sqlite(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
        }
    }

    /// Builds the repositories backed by this pool.
    pub fn repositories(&self) -> (Arc<dyn LinkRepository>, Arc<dyn StatsRepository>) {
        match self {
            Database::Postgres(pool) => {
                let pool = Arc::new(pool.clone());
                (
                    Arc::new(PgLinkRepository::new(pool.clone())),
                    Arc::new(PgStatsRepository::new(pool)),
                )
            }
            Database::Sqlite(pool) => {
                let pool = Arc::new(pool.clone());
                (
                    Arc::new(SqliteLinkRepository::new(pool.clone())),
                    Arc::new(SqliteStatsRepository::new(pool)),
                )
            }
        }
    }

    pub async fn close(&self) {
        match self {
            Database::Postgres(pool) => pool.close().await,
            Database::Sqlite(pool) => pool.close().await,
        }
    }
}
