//! DTOs for the root endpoint.

use serde::{Deserialize, Serialize};

/// Query accepted by `GET /`.
///
/// `?id=<token>` is the legacy link shape and resolves like `GET /{token}`.
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub id: Option<String>,
}

/// Service description returned by `GET /` without a token.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}
