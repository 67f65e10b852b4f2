//! Calculation engine: sums `1 / k^2` over an inclusive range using one of
//! three execution strategies, and measures the run.
//!
//! All entry points are synchronous and CPU-bound. Async callers must run
//! them on a blocking thread (`tokio::task::spawn_blocking`).

use std::ops::RangeInclusive;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crate::calculation::ComputeRequest;
use crate::error::CoreError;
use crate::metrics::PerformanceMetrics;
use crate::mode::ProcessingMode;
use crate::usage::UsageSnapshot;

/// Upper limit on parallel workers regardless of available cores.
pub const MAX_WORKERS: usize = 8;

/// Number of workers used by the parallel strategies on this machine.
pub fn worker_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(MAX_WORKERS)
}

/// Sum `1 / k^2` for every `k` in `range`.
pub fn sum_inverse_squares(range: RangeInclusive<i64>) -> f64 {
    range
        .map(|k| {
            let k = k as f64;
            1.0 / (k * k)
        })
        .sum()
}

/// Split `[lower, upper]` into at most `workers` contiguous chunks.
///
/// Chunks are `max(1, total / workers)` long; the last chunk absorbs the
/// remainder so every term is covered exactly once.
pub fn chunk_ranges(lower: i64, upper: i64, workers: usize) -> Vec<RangeInclusive<i64>> {
    if upper < lower || workers == 0 {
        return Vec::new();
    }

    let total = upper - lower + 1;
    let workers = workers as i64;
    let chunk = (total / workers).max(1);

    let mut chunks = Vec::new();
    for t in 0..workers {
        let start = lower + t * chunk;
        if start > upper {
            break;
        }
        let end = if t == workers - 1 {
            upper
        } else {
            (start + chunk - 1).min(upper)
        };
        chunks.push(start..=end);
    }
    chunks
}

/// Run a calculation with the request's processing mode and measure it.
pub fn run(request: &ComputeRequest) -> Result<PerformanceMetrics, CoreError> {
    let workers = match request.processing_mode {
        ProcessingMode::Sequential => 1,
        ProcessingMode::Threading | ProcessingMode::Multiprocessing => worker_count(),
    };

    let before = UsageSnapshot::capture();
    let started = Instant::now();

    let result_value = match request.processing_mode {
        ProcessingMode::Sequential => {
            sum_inverse_squares(request.lower_bound..=request.upper_bound)
        }
        ProcessingMode::Threading => {
            sum_scoped_threads(request.lower_bound, request.upper_bound, workers)?
        }
        ProcessingMode::Multiprocessing => {
            sum_isolated_workers(request.lower_bound, request.upper_bound, workers)?
        }
    };

    let wall = started.elapsed();
    let after = UsageSnapshot::capture();

    Ok(PerformanceMetrics::from_run(
        request,
        wall,
        before,
        after,
        result_value,
        workers,
    ))
}

/// Threading strategy: scoped threads borrow their chunk and return a
/// partial sum through their join handle.
fn sum_scoped_threads(lower: i64, upper: i64, workers: usize) -> Result<f64, CoreError> {
    let chunks = chunk_ranges(lower, upper, workers);

    thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .iter()
            .map(|chunk| scope.spawn(move || sum_inverse_squares(chunk.clone())))
            .collect();

        handles.into_iter().try_fold(0.0, |acc, handle| {
            handle
                .join()
                .map(|partial| acc + partial)
                .map_err(|_| CoreError::Calculation("Worker thread panicked".into()))
        })
    })
}

/// Multiprocessing strategy: detached workers own their chunk outright and
/// report partial sums over a channel; nothing is shared between them.
fn sum_isolated_workers(lower: i64, upper: i64, workers: usize) -> Result<f64, CoreError> {
    let chunks = chunk_ranges(lower, upper, workers);
    let expected = chunks.len();
    let (tx, rx) = mpsc::channel::<f64>();

    let mut handles = Vec::with_capacity(expected);
    for (index, chunk) in chunks.into_iter().enumerate() {
        let tx = tx.clone();
        let handle = thread::Builder::new()
            .name(format!("calc-worker-{index}"))
            .spawn(move || {
                // A closed receiver means the run was abandoned.
                let _ = tx.send(sum_inverse_squares(chunk));
            })
            .map_err(|e| CoreError::Calculation(format!("Failed to spawn worker: {e}")))?;
        handles.push(handle);
    }
    drop(tx);

    let mut total = 0.0;
    let mut received = 0;
    for partial in rx {
        total += partial;
        received += 1;
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| CoreError::Calculation("Worker panicked".into()))?;
    }

    if received != expected {
        return Err(CoreError::Calculation(format!(
            "Expected {expected} partial results, received {received}"
        )));
    }
    Ok(total)
}
