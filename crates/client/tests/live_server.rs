//! End-to-end tests: the HTTP client and view against the real API router
//! served on an ephemeral port.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use perfcalc_api::config::ServerConfig;
use perfcalc_api::router::build_app_router;
use perfcalc_api::state::AppState;
use perfcalc_client::api::{HttpResultsApi, ResultsApi};
use perfcalc_client::error::ClientError;
use perfcalc_client::surface::RecordingSurface;
use perfcalc_client::view::{FormInput, LoadOutcome, ResultsView, SubmitOutcome};
use perfcalc_core::calculation::ComputeRequest;
use perfcalc_core::mode::ProcessingMode;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serve `app` on `127.0.0.1:0` and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Serve the full application router and return its base URL.
async fn spawn_server(pool: SqlitePool) -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
    };
    let state = AppState { pool };
    serve(build_app_router(state, &config)).await
}

fn one_result_listing() -> Response {
    Json(serde_json::json!({
        "results": [{
            "id": 1,
            "timestamp": "2026-01-01T00:00:00+00:00",
            "lower_bound": 1,
            "upper_bound": 10,
            "processing_mode": "sequential",
            "execution_time": 0.12345,
            "cpu_time": 0.1,
            "memory_usage": 12.345,
            "cpu_utilization": 50.1,
            "result_value": 1.54976773,
            "cores_used": 1
        }]
    }))
    .into_response()
}

/// `/api/results` answers with one row on the first call and with
/// `then` on every later call.
fn results_router_that_degrades(then: fn() -> Response) -> Router {
    let calls = Arc::new(AtomicUsize::new(0));
    Router::new().route(
        "/api/results",
        get(move || {
            let calls = Arc::clone(&calls);
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    one_result_listing()
                } else {
                    then()
                }
            }
        }),
    )
}

/// Load once successfully, then reload against the degraded endpoint and
/// check that the first rendering survives.
async fn assert_reload_failure_keeps_rows(then: fn() -> Response) {
    let view = live_view(serve(results_router_that_degrades(then)).await);

    assert_eq!(view.load_results().await, LoadOutcome::Shown(1));
    let rendered = view.surface().rows.clone();

    assert_matches!(
        view.load_results().await,
        LoadOutcome::Failed(ClientError::LoadFailed(_))
    );
    let surface = view.surface();
    assert_eq!(surface.rows, rendered);
    assert!(surface.table_visible);
    assert_eq!(surface.status, perfcalc_client::view::STATUS_LOAD_ERROR);
}

fn live_view(base_url: String) -> ResultsView<HttpResultsApi, RecordingSurface> {
    ResultsView::new(
        HttpResultsApi::new(base_url),
        RecordingSurface::default(),
        Duration::from_secs(10),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn fresh_server_has_empty_history(pool: SqlitePool) {
    let view = live_view(spawn_server(pool).await);

    assert_eq!(view.load_results().await, LoadOutcome::Empty);
    assert!(!view.surface().table_visible);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_round_trip_renders_new_row(pool: SqlitePool) {
    let view = live_view(spawn_server(pool).await);

    let outcome = view
        .submit(&FormInput::new("1", "1000", Some("threading")))
        .await;

    assert_eq!(
        outcome,
        SubmitOutcome::Completed {
            refresh: LoadOutcome::Shown(1)
        }
    );
    let surface = view.surface();
    assert!(surface.table_visible);
    let row = &surface.rows[0];
    assert_eq!(row.cells[0], "1");
    assert_eq!(row.cells[1], "1000");
    assert_eq!(row.cells[2], "threading");
    assert!(row.cells[7].starts_with("1.64"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn newest_result_is_listed_first(pool: SqlitePool) {
    let view = live_view(spawn_server(pool).await);

    view.submit(&FormInput::new("1", "10", Some("sequential")))
        .await;
    view.submit(&FormInput::new("1", "20", Some("multiprocessing")))
        .await;

    let surface = view.surface();
    assert_eq!(surface.rows.len(), 2);
    assert_eq!(surface.rows[0].cells[2], "multiprocessing");
    assert_eq!(surface.rows[1].cells[2], "sequential");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn server_rejection_surfaces_as_request_failed(pool: SqlitePool) {
    let api = HttpResultsApi::new(spawn_server(pool).await);
    let request = ComputeRequest::new(1, 50_000_000, ProcessingMode::Sequential).unwrap();

    let err = api.calculate(&request).await.unwrap_err();

    assert_matches!(
        err,
        ClientError::RequestFailed(msg)
            if msg == "HTTP 400: Range too large. Maximum range is 10 million"
    );
}

#[tokio::test]
async fn unreachable_server_is_a_load_failure() {
    // Bind and immediately drop a listener to get a port nobody serves.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let view = live_view(format!("http://{addr}"));

    assert_matches!(
        view.load_results().await,
        LoadOutcome::Failed(ClientError::LoadFailed(_))
    );
    assert_eq!(
        view.surface().status,
        perfcalc_client::view::STATUS_LOAD_ERROR
    );
}

#[tokio::test]
async fn non_ok_results_response_keeps_previous_rows() {
    assert_reload_failure_keeps_rows(|| {
        (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
    })
    .await;
}

#[tokio::test]
async fn malformed_results_body_keeps_previous_rows() {
    assert_reload_failure_keeps_rows(|| Json(serde_json::json!({ "rows": [] })).into_response())
        .await;
}

#[tokio::test]
async fn non_ok_results_detail_carries_status_and_body() {
    let app = Router::new().route(
        "/api/results",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let api = HttpResultsApi::new(serve(app).await);

    assert_matches!(
        api.list_results().await,
        Err(ClientError::LoadFailed(msg)) if msg == "HTTP 503: maintenance"
    );
}

#[tokio::test]
async fn calculate_error_without_body_reports_bare_status() {
    let app = Router::new().route(
        "/api/calculate",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base_url = serve(app).await;
    let request = ComputeRequest::new(1, 10, ProcessingMode::Sequential).unwrap();

    let err = HttpResultsApi::new(base_url.clone())
        .calculate(&request)
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::RequestFailed("HTTP 500".to_string()));

    // Through the view the failure lands in the status line and no refresh runs.
    let view = live_view(base_url);
    let outcome = view
        .submit(&FormInput::new("1", "10", Some("sequential")))
        .await;

    assert_matches!(outcome, SubmitOutcome::Failed(ClientError::RequestFailed(msg)) if msg == "HTTP 500");
    let surface = view.surface();
    assert_eq!(surface.status, "Error: Server error: HTTP 500");
    assert!(!surface.table_visible);
}
