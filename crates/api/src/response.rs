//! Response bodies for the calculation endpoints.
//!
//! These shapes are consumed by the bundled results page and the
//! `perfcalc` client, so field names are part of the wire contract.

use perfcalc_core::metrics::PerformanceMetrics;
use perfcalc_db::models::performance_result::PerformanceResult;
use serde::Serialize;

/// Body returned by `POST /api/calculate`.
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub metrics: PerformanceMetrics,
    pub success: bool,
    pub message: &'static str,
}

/// Body returned by `GET /api/results`.
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<PerformanceResult>,
    pub total_count: i64,
    pub offset: i64,
    pub limit: i64,
    pub filter: Option<ResultsFilter>,
}

/// Echo of the filter applied to a results listing.
#[derive(Debug, Serialize)]
pub struct ResultsFilter {
    pub processing_mode: String,
}

/// Standard `{ "data": T }` envelope for single-entity lookups.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
