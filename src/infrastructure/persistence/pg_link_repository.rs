//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};

type LinkRow = (String, String, DateTime<Utc>);

fn into_link((url, token, created_at): LinkRow) -> ShortLink {
    ShortLink::new(url, token, created_at)
}

/// PostgreSQL repository for short link storage and retrieval.
///
/// All values are passed as bound parameters.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT url, token, created_at
            FROM shortlinks
            WHERE url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(into_link))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT url, token, created_at
            FROM shortlinks
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(into_link))
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO shortlinks (url, token, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            RETURNING url, token, created_at
            "#,
        )
        .bind(&new_link.url)
        .bind(&new_link.token)
        .bind(new_link.created_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(row) = row {
            return Ok(into_link(row));
        }

        let url_taken: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM shortlinks WHERE url = $1)")
                .bind(&new_link.url)
                .fetch_one(self.pool.as_ref())
                .await?;

        if url_taken {
            Err(StoreError::DuplicateUrl)
        } else {
            Err(StoreError::DuplicateToken)
        }
    }
}
