//! Visit entities: single redirect events and their aggregates.

use chrono::{DateTime, NaiveDate, Utc};

/// One resolution of a known token to its destination.
///
/// Append-only; several events may share a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub token: String,
    pub visited_at: DateTime<Utc>,
}

impl VisitEvent {
    /// Creates an event stamped with the current time.
    pub fn now(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            visited_at: Utc::now(),
        }
    }
}

/// Number of visits recorded on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyVisits {
    pub day: NaiveDate,
    pub visits: i64,
}

/// The most visited token and its visit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopToken {
    pub token: String,
    pub visits: i64,
}

/// Creation timestamps of the chronologically first and last short links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationSpan {
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
}
