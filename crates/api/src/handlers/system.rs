use axum::response::IntoResponse;
use axum::Json;
use perfcalc_core::system::SystemInfo;

use crate::error::{AppError, AppResult};

/// GET /api/system-info
///
/// CPU count, frequency and memory of the host running the calculations.
pub async fn get_system_info() -> AppResult<impl IntoResponse> {
    let info = tokio::task::spawn_blocking(SystemInfo::probe)
        .await
        .map_err(|e| AppError::InternalError(format!("System probe task failed: {e}")))?;

    Ok(Json(info))
}
