use axum::routing::get;
use axum::Router;

use crate::handlers::system;
use crate::state::AppState;

/// Host information routes mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/system-info", get(system::get_system_info))
}
