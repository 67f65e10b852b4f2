pub mod health;
pub mod home;
pub mod performance;
pub mod system;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /calculate                 run a calculation and store it (POST)
/// /results                   list historical results (GET)
/// /results/{id}              single historical result (GET)
/// /system-info               host hardware summary (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(performance::router())
        .merge(system::router())
}
