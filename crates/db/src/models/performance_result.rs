//! Performance result entity model and DTOs.

use perfcalc_core::metrics::PerformanceMetrics;
use perfcalc_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A persisted calculation run.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PerformanceResult {
    pub id: DbId,
    pub timestamp: String,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub processing_mode: String,
    pub execution_time: f64,
    pub cpu_time: f64,
    pub memory_usage: f64,
    pub cpu_utilization: f64,
    pub result_value: f64,
    pub cores_used: i64,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
}

/// DTO for inserting a new performance result.
#[derive(Debug, Clone)]
pub struct CreatePerformanceResult {
    pub timestamp: String,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub processing_mode: String,
    pub execution_time: f64,
    pub cpu_time: f64,
    pub memory_usage: f64,
    pub cpu_utilization: f64,
    pub result_value: f64,
    pub cores_used: i64,
}

impl From<&PerformanceMetrics> for CreatePerformanceResult {
    fn from(metrics: &PerformanceMetrics) -> Self {
        Self {
            timestamp: metrics.timestamp.clone(),
            lower_bound: metrics.lower_bound,
            upper_bound: metrics.upper_bound,
            processing_mode: metrics.processing_mode.as_str().to_string(),
            execution_time: metrics.execution_time,
            cpu_time: metrics.cpu_time,
            memory_usage: metrics.memory_usage,
            cpu_utilization: metrics.cpu_utilization,
            result_value: metrics.result_value,
            cores_used: i64::from(metrics.cores_used),
        }
    }
}
