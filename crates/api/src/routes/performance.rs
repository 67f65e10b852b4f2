//! Route definitions for calculation runs and their history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::performance;
use crate::state::AppState;

/// Calculation routes mounted under `/api`.
///
/// ```text
/// POST /calculate         -> calculate
/// GET  /results           -> list_results
/// GET  /results/{id}      -> get_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(performance::calculate))
        .route("/results", get(performance::list_results))
        .route("/results/{id}", get(performance::get_result))
}
