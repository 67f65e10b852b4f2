//! Repository for the `performance_results` table.

use crate::models::performance_result::{CreatePerformanceResult, PerformanceResult};
use crate::DbPool;

/// Column list for `performance_results` SELECT queries.
const COLUMNS: &str = "\
    id, timestamp, lower_bound, upper_bound, processing_mode, \
    execution_time, cpu_time, memory_usage, cpu_utilization, \
    result_value, cores_used, created_at";

/// Column list for INSERT (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    timestamp, lower_bound, upper_bound, processing_mode, \
    execution_time, cpu_time, memory_usage, cpu_utilization, \
    result_value, cores_used";

/// Provides query operations for historical calculation results.
pub struct PerformanceResultRepo;

impl PerformanceResultRepo {
    /// Insert a single result and return the stored row.
    pub async fn insert(
        pool: &DbPool,
        result: &CreatePerformanceResult,
    ) -> Result<PerformanceResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO performance_results ({INSERT_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PerformanceResult>(&query)
            .bind(&result.timestamp)
            .bind(result.lower_bound)
            .bind(result.upper_bound)
            .bind(&result.processing_mode)
            .bind(result.execution_time)
            .bind(result.cpu_time)
            .bind(result.memory_usage)
            .bind(result.cpu_utilization)
            .bind(result.result_value)
            .bind(result.cores_used)
            .fetch_one(pool)
            .await?;

        tracing::debug!(id = row.id, mode = %row.processing_mode, "Stored performance result");
        Ok(row)
    }

    /// Newest-first page of results, optionally restricted to one processing mode.
    pub async fn list(
        pool: &DbPool,
        processing_mode: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PerformanceResult>, sqlx::Error> {
        match processing_mode {
            Some(mode) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM performance_results \
                     WHERE processing_mode = ?1 \
                     ORDER BY id DESC LIMIT ?2 OFFSET ?3"
                );
                sqlx::query_as::<_, PerformanceResult>(&query)
                    .bind(mode)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM performance_results \
                     ORDER BY id DESC LIMIT ?1 OFFSET ?2"
                );
                sqlx::query_as::<_, PerformanceResult>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Total number of results, optionally restricted to one processing mode.
    pub async fn count(pool: &DbPool, processing_mode: Option<&str>) -> Result<i64, sqlx::Error> {
        match processing_mode {
            Some(mode) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM performance_results WHERE processing_mode = ?1",
                )
                .bind(mode)
                .fetch_one(pool)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM performance_results")
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Fetch a single result by id.
    pub async fn find_by_id(
        pool: &DbPool,
        id: i64,
    ) -> Result<Option<PerformanceResult>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM performance_results WHERE id = ?1");
        sqlx::query_as::<_, PerformanceResult>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
