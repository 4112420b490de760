//! Repository trait for the visit log and statistics queries.

use crate::domain::entities::{CreationSpan, DailyVisits, TopToken, VisitEvent};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Repository interface for recording visits and reading aggregates.
///
/// All methods except [`StatsRepository::record_visit`] are read-only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteStatsRepository`] - SQLite
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Appends a visit event to the log.
    ///
    /// The store does not check that the token exists.
    async fn record_visit(&self, visit: VisitEvent) -> Result<(), StoreError>;

    /// Counts all short links.
    async fn count_links(&self) -> Result<i64, StoreError>;

    /// Returns the earliest and latest creation timestamps.
    ///
    /// `Ok(None)` when no links exist.
    async fn creation_span(&self) -> Result<Option<CreationSpan>, StoreError>;

    /// Counts all recorded visits.
    async fn count_visits(&self) -> Result<i64, StoreError>;

    /// Returns the token with the most visits.
    ///
    /// Ties are broken by token in ascending order. `Ok(None)` when the log is empty.
    async fn top_token(&self) -> Result<Option<TopToken>, StoreError>;

    /// Counts visits per UTC calendar day, most recent day first.
    async fn visits_per_day(&self) -> Result<Vec<DailyVisits>, StoreError>;
}
