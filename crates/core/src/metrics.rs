//! Measured outcome of a single calculation run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calculation::ComputeRequest;
use crate::mode::ProcessingMode;
use crate::usage::{UsageSnapshot, BYTES_PER_MB};

/// Performance measurements for one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// RFC 3339 UTC time the run finished.
    pub timestamp: String,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub processing_mode: ProcessingMode,
    /// Wall-clock seconds.
    pub execution_time: f64,
    /// Process CPU seconds across all threads. Includes any other work the
    /// process did concurrently with the run.
    pub cpu_time: f64,
    /// Resident memory growth between the start and end of the run, in MB.
    /// Zero when the process shrank or reused already-resident pages.
    pub memory_usage: f64,
    /// `cpu_time / execution_time` as a percentage; exceeds 100 on multiple cores.
    pub cpu_utilization: f64,
    pub result_value: f64,
    pub cores_used: i32,
}

impl PerformanceMetrics {
    /// Assemble metrics from the usage snapshots taken around a run.
    pub fn from_run(
        request: &ComputeRequest,
        wall: Duration,
        before: UsageSnapshot,
        after: UsageSnapshot,
        result_value: f64,
        cores_used: usize,
    ) -> Self {
        let execution_time = wall.as_secs_f64();
        let cpu_time = after.cpu_time.saturating_sub(before.cpu_time).as_secs_f64();
        let memory_usage =
            after.resident_bytes.saturating_sub(before.resident_bytes) as f64 / BYTES_PER_MB;

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            lower_bound: request.lower_bound,
            upper_bound: request.upper_bound,
            processing_mode: request.processing_mode,
            execution_time,
            cpu_time,
            memory_usage,
            cpu_utilization: cpu_utilization(cpu_time, execution_time),
            result_value,
            cores_used: i32::try_from(cores_used).unwrap_or(i32::MAX),
        }
    }
}

/// CPU utilization percentage for a run. Zero when no wall time elapsed.
pub fn cpu_utilization(cpu_time: f64, execution_time: f64) -> f64 {
    if execution_time <= 0.0 {
        0.0
    } else {
        cpu_time / execution_time * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cpu_ms: u64, rss: u64) -> UsageSnapshot {
        UsageSnapshot {
            cpu_time: Duration::from_millis(cpu_ms),
            resident_bytes: rss,
        }
    }

    #[test]
    fn utilization_handles_zero_wall_time() {
        assert_eq!(cpu_utilization(1.0, 0.0), 0.0);
    }

    #[test]
    fn utilization_can_exceed_one_core() {
        assert_eq!(cpu_utilization(2.0, 1.0), 200.0);
    }

    #[test]
    fn from_run_computes_deltas() {
        let request = ComputeRequest::new(1, 10, ProcessingMode::Sequential).unwrap();
        let metrics = PerformanceMetrics::from_run(
            &request,
            Duration::from_millis(500),
            snapshot(100, 10 * 1024 * 1024),
            snapshot(350, 12 * 1024 * 1024),
            1.5,
            1,
        );

        assert_eq!(metrics.lower_bound, 1);
        assert_eq!(metrics.upper_bound, 10);
        assert!((metrics.execution_time - 0.5).abs() < 1e-9);
        assert!((metrics.cpu_time - 0.25).abs() < 1e-9);
        assert!((metrics.memory_usage - 2.0).abs() < 1e-9);
        assert!((metrics.cpu_utilization - 50.0).abs() < 1e-9);
        assert_eq!(metrics.cores_used, 1);
    }

    #[test]
    fn memory_never_negative() {
        let request = ComputeRequest::new(1, 10, ProcessingMode::Sequential).unwrap();
        let metrics = PerformanceMetrics::from_run(
            &request,
            Duration::from_millis(1),
            snapshot(0, 5_000),
            snapshot(0, 4_000),
            0.0,
            1,
        );
        assert_eq!(metrics.memory_usage, 0.0);
    }
}
