//! SQLite implementation of statistics repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::sqlite_link_repository::from_unix;
use crate::domain::entities::{CreationSpan, DailyVisits, TopToken, VisitEvent};
use crate::domain::repositories::{StatsRepository, StoreError};

/// SQLite repository for the visit log and aggregate queries.
pub struct SqliteStatsRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn record_visit(&self, visit: VisitEvent) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO visits (token, visited_at) VALUES (?, ?)")
            .bind(&visit.token)
            .bind(visit.visited_at.timestamp())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn count_links(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM shortlinks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn creation_span(&self) -> Result<Option<CreationSpan>, StoreError> {
        let (first, last): (Option<i64>, Option<i64>) =
            sqlx::query_as("SELECT MIN(created_at), MAX(created_at) FROM shortlinks")
                .fetch_one(self.pool.as_ref())
                .await?;

        match (first, last) {
            (Some(first), Some(last)) => Ok(Some(CreationSpan {
                first: from_unix(first)?,
                last: from_unix(last)?,
            })),
            _ => Ok(None),
        }
    }

    async fn count_visits(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn top_token(&self) -> Result<Option<TopToken>, StoreError> {
        let row: Option<(String, i64)> = sqlx::query_as(
            r#"
            SELECT token, COUNT(*) AS visits
            FROM visits
            GROUP BY token
            ORDER BY visits DESC, token ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(token, visits)| TopToken { token, visits }))
    }

    async fn visits_per_day(&self) -> Result<Vec<DailyVisits>, StoreError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT date(visited_at, 'unixepoch') AS day, COUNT(*) AS visits
            FROM visits
            GROUP BY day
            ORDER BY day DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(day, visits)| {
                let day = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                    .map_err(|e| StoreError::Corrupt(format!("bad visit day '{day}': {e}")))?;
                Ok(DailyVisits { day, visits })
            })
            .collect()
    }
}
