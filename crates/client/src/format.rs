//! Fixed-precision rendering of result rows.

use crate::api::ComputeResult;

/// Column headers, in display order.
pub const COLUMNS: [&str; 8] = [
    "i",
    "j",
    "Mode",
    "Exec time (s)",
    "CPU time (s)",
    "Memory (MB)",
    "CPU (%)",
    "Result",
];

/// A result formatted for display, one string per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub cells: [String; 8],
}

impl ResultRow {
    /// Cells joined with ` | `.
    pub fn display_line(&self) -> String {
        self.cells.join(" | ")
    }
}

impl From<&ComputeResult> for ResultRow {
    fn from(result: &ComputeResult) -> Self {
        Self {
            cells: [
                result.lower_bound.to_string(),
                result.upper_bound.to_string(),
                result.processing_mode.clone(),
                format!("{:.4}", result.execution_time),
                format!("{:.4}", result.cpu_time),
                format!("{:.2}", result.memory_usage),
                format!("{:.2}", result.cpu_utilization),
                format!("{:.8}", result.result_value),
            ],
        }
    }
}

/// Format every result, preserving order.
pub fn format_rows(results: &[ComputeResult]) -> Vec<ResultRow> {
    results.iter().map(ResultRow::from).collect()
}
