//! Handlers for token redirects.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::api::dto::index::{IndexQuery, IndexResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a token to its destination.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Behavior
///
/// - Known token: records a visit and returns 307 to the stored URL
/// - Unknown token: returns 307 to the configured home location, no visit
///
/// # Errors
///
/// Returns 500 only if the lookup itself fails.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let target = state.redirect_service.resolve(&token).await?;

    Ok(Redirect::temporary(target.location()))
}

/// Root endpoint.
///
/// `GET /?id={token}` redirects exactly like `GET /{token}`; `GET /` returns a
/// short service description.
pub async fn index_handler(
    Query(query): Query<IndexQuery>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if let Some(token) = query.id {
        let target = state.redirect_service.resolve(&token).await?;
        return Ok(Redirect::temporary(target.location()).into_response());
    }

    Ok(Json(IndexResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "POST /api/shorten",
            "GET /api/stats",
            "GET /health",
            "GET /{token}",
        ],
    })
    .into_response())
}
