//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{BatchSummary, ShortenRequest, ShortenResponse, ShortenResultItem};
use crate::error::AppError;
use crate::state::AppState;

/// Creates short links for one or more long URLs.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Batch Processing
///
/// Processes URLs independently. If one fails, others continue processing.
/// Re-submitting an already shortened URL returns its existing token.
///
/// # Request Body
///
/// ```json
/// { "urls": [ { "url": "github.com" } ] }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 1, "successful": 1, "failed": 0 },
///   "items": [
///     {
///       "long_url": "github.com",
///       "url": "http://github.com",
///       "token": "aB3x",
///       "short_url": "http://localhost:3000/aB3x"
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the request body fails validation.
/// Per-URL errors (`invalid_url`, `token_space_exhausted`, ...) are returned in the
/// items array.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let total = payload.urls.len();
    let mut items = Vec::with_capacity(total);
    let mut successful = 0;

    for item in payload.urls {
        match state.link_service.shorten(&item.url).await {
            Ok(link) => {
                successful += 1;
                items.push(ShortenResultItem::Success {
                    short_url: state.link_service.short_url(&link.token),
                    long_url: item.url,
                    url: link.url,
                    token: link.token,
                });
            }
            Err(err) => items.push(ShortenResultItem::Error {
                long_url: item.url,
                error: err.to_error_info(),
            }),
        }
    }

    Ok(Json(ShortenResponse {
        summary: BatchSummary {
            total,
            successful,
            failed: total - successful,
        },
        items,
    }))
}
