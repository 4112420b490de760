//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{CreationSpan, DailyVisits, TopToken, VisitEvent};
use crate::domain::repositories::{StatsRepository, StoreError};

/// PostgreSQL repository for the visit log and aggregate queries.
///
/// Day buckets are computed in UTC regardless of the session time zone.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_visit(&self, visit: VisitEvent) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO visits (token, visited_at) VALUES ($1, $2)")
            .bind(&visit.token)
            .bind(visit.visited_at)
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
        let (first, last): (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
            sqlx::query_as("SELECT MIN(created_at), MAX(created_at) FROM shortlinks")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(first.zip(last).map(|(first, last)| CreationSpan { first, last }))
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
            ORDER BY visits DESC, token COLLATE "C" ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(token, visits)| TopToken { token, visits }))
    }

    async fn visits_per_day(&self) -> Result<Vec<DailyVisits>, StoreError> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            r#"
            SELECT (visited_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS visits
            FROM visits
            GROUP BY day
            ORDER BY day DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(day, visits)| DailyVisits { day, visits })
            .collect())
    }
}
