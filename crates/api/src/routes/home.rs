use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// Serves the bundled results page at `/`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home::index))
}
