//! DTOs for the statistics endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::application::services::StatsReport;
use crate::domain::entities::{DailyVisits, TopToken};

/// Summary of all links and visits.
///
/// Timestamps and `top_token` serialize as `null` on an empty store.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_links: i64,
    pub first_created_at: Option<DateTime<Utc>>,
    pub last_created_at: Option<DateTime<Utc>>,
    pub total_visits: i64,
    pub top_token: Option<TopTokenInfo>,
    pub visits_per_day: Vec<DailyVisitsInfo>,
}

#[derive(Debug, Serialize)]
pub struct TopTokenInfo {
    pub token: String,
    pub visits: i64,
}

#[derive(Debug, Serialize)]
pub struct DailyVisitsInfo {
    /// `YYYY-MM-DD`, UTC.
    pub day: NaiveDate,
    pub visits: i64,
}

impl From<TopToken> for TopTokenInfo {
    fn from(top: TopToken) -> Self {
        Self {
            token: top.token,
            visits: top.visits,
        }
    }
}

impl From<DailyVisits> for DailyVisitsInfo {
    fn from(daily: DailyVisits) -> Self {
        Self {
            day: daily.day,
            visits: daily.visits,
        }
    }
}

impl From<StatsReport> for StatsResponse {
    fn from(report: StatsReport) -> Self {
        Self {
            total_links: report.total_links,
            first_created_at: report.first_created_at,
            last_created_at: report.last_created_at,
            total_visits: report.total_visits,
            top_token: report.top_token.map(Into::into),
            visits_per_day: report.visits_per_day.into_iter().map(Into::into).collect(),
        }
    }
}
