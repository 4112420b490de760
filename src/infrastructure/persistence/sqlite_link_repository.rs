//! SQLite implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};

type LinkRow = (String, String, i64);

/// Decodes a unix-seconds column.
pub(crate) fn from_unix(secs: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StoreError::Corrupt(format!("timestamp out of range: {secs}")))
}

fn into_link((url, token, created_at): LinkRow) -> Result<ShortLink, StoreError> {
    Ok(ShortLink::new(url, token, from_unix(created_at)?))
}

/// SQLite repository for short link storage and retrieval.
///
/// Timestamps are stored as unix seconds, so `created_at` is truncated to
/// whole seconds on insert.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT url, token, created_at FROM shortlinks WHERE url = ?",
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(into_link).transpose()
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT url, token, created_at FROM shortlinks WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(into_link).transpose()
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let created_at = new_link.created_at.timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO shortlinks (url, token, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&new_link.url)
        .bind(&new_link.token)
        .bind(created_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            let url_taken: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM shortlinks WHERE url = ?")
                    .bind(&new_link.url)
                    .fetch_one(self.pool.as_ref())
                    .await?;

            return Err(if url_taken > 0 {
                StoreError::DuplicateUrl
            } else {
                StoreError::DuplicateToken
            });
        }

        Ok(ShortLink::new(
            new_link.url,
            new_link.token,
            from_unix(created_at)?,
        ))
    }
}
