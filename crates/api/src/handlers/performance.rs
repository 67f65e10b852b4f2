//! Handlers for calculation runs and the historical results listing.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use perfcalc_core::calculation::{validate_bounds, validate_range_size, ComputeRequest};
use perfcalc_core::engine;
use perfcalc_core::error::CoreError;
use perfcalc_core::mode::ProcessingMode;
use perfcalc_core::pagination::{
    clamp_limit, clamp_offset, DEFAULT_RESULTS_LIMIT, MAX_RESULTS_LIMIT,
};
use perfcalc_core::types::DbId;
use perfcalc_db::models::performance_result::CreatePerformanceResult;
use perfcalc_db::repositories::PerformanceResultRepo;

use crate::error::{AppError, AppResult};
use crate::query::ResultsQuery;
use crate::response::{CalculationResponse, DataResponse, ResultsFilter, ResultsResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// POST /api/calculate
///
/// Validates the bounds, runs the engine on a blocking thread, stores the
/// measured result and returns the metrics.
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<ComputeRequest>,
) -> AppResult<impl IntoResponse> {
    validate_bounds(request.lower_bound, request.upper_bound)?;
    validate_range_size(request.lower_bound, request.upper_bound)?;

    tracing::info!(
        lower_bound = request.lower_bound,
        upper_bound = request.upper_bound,
        mode = %request.processing_mode,
        "Starting calculation"
    );

    let metrics = tokio::task::spawn_blocking(move || engine::run(&request))
        .await
        .map_err(|e| CoreError::Internal(format!("Calculation task failed: {e}")))??;

    let stored =
        PerformanceResultRepo::insert(&state.pool, &CreatePerformanceResult::from(&metrics))
            .await?;

    tracing::info!(
        id = stored.id,
        mode = %metrics.processing_mode,
        execution_time = metrics.execution_time,
        cores_used = metrics.cores_used,
        "Calculation completed"
    );

    Ok(Json(CalculationResponse {
        metrics,
        success: true,
        message: "Calculation completed successfully",
    }))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/results
///
/// Newest-first page of stored results, optionally filtered by processing mode.
pub async fn list_results(
    State(state): State<AppState>,
    Query(params): Query<ResultsQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_RESULTS_LIMIT, MAX_RESULTS_LIMIT);
    let offset = clamp_offset(params.offset);

    let mode = match params.processing_mode.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<ProcessingMode>()?),
    };
    let mode_name = mode.map(ProcessingMode::as_str);

    let total_count = PerformanceResultRepo::count(&state.pool, mode_name).await?;
    let results = PerformanceResultRepo::list(&state.pool, mode_name, limit, offset).await?;

    Ok(Json(ResultsResponse {
        results,
        total_count,
        offset,
        limit,
        filter: mode_name.map(|m| ResultsFilter {
            processing_mode: m.to_string(),
        }),
    }))
}

/// GET /api/results/{id}
pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let result = PerformanceResultRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Performance result",
            id,
        }))?;

    Ok(Json(DataResponse { data: result }))
}
