//! Handler for the statistics endpoint.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns link and visit statistics.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// {
///   "total_links": 2,
///   "first_created_at": "2025-01-01T10:00:00Z",
///   "last_created_at": "2025-01-03T09:30:00Z",
///   "total_visits": 5,
///   "top_token": { "token": "aB3x", "visits": 4 },
///   "visits_per_day": [
///     { "day": "2025-01-03", "visits": 3 },
///     { "day": "2025-01-02", "visits": 2 }
///   ]
/// }
/// ```
///
/// On an empty store the timestamps and `top_token` are `null` and
/// `visits_per_day` is empty.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let report = state.stats_service.summarize().await?;

    Ok(Json(report.into()))
}
