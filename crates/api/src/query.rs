//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /api/results` (`?limit=&offset=&processing_mode=`).
///
/// Limit and offset are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub processing_mode: Option<String>,
}
