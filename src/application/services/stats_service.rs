//! Visit statistics service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{DailyVisits, TopToken};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Summary of links and visits.
///
/// Empty stores are represented explicitly: `None` timestamps and top token,
/// an empty histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub total_links: i64,
    pub first_created_at: Option<DateTime<Utc>>,
    pub last_created_at: Option<DateTime<Utc>>,
    pub total_visits: i64,
    pub top_token: Option<TopToken>,
    /// Most recent day first.
    pub visits_per_day: Vec<DailyVisits>,
}

/// Service computing read-only aggregates over links and the visit log.
pub struct StatsService<S: StatsRepository + ?Sized> {
    repository: Arc<S>,
}

impl<S: StatsRepository + ?Sized> StatsService<S> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<S>) -> Self {
        Self { repository }
    }

    /// Builds the full statistics report.
    ///
    /// Issues read queries only; repeated calls without intervening writes
    /// return identical reports.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summarize(&self) -> Result<StatsReport, AppError> {
        let total_links = self.repository.count_links().await?;
        let span = self.repository.creation_span().await?;
        let total_visits = self.repository.count_visits().await?;
        let top_token = self.repository.top_token().await?;
        let visits_per_day = self.repository.visits_per_day().await?;

        Ok(StatsReport {
            total_links,
            first_created_at: span.map(|s| s.first),
            last_created_at: span.map(|s| s.last),
            total_visits,
            top_token,
            visits_per_day,
        })
    }

    /// Counts all short links.
    ///
    /// Used by the health check as a cheap store round trip.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        Ok(self.repository.count_links().await?)
    }
}
