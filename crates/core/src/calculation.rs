//! Calculation request type and bound validation.
//!
//! The same bound rules are checked by the results client before anything
//! is sent and again by the server at the HTTP boundary.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::mode::ProcessingMode;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Smallest accepted lower bound.
pub const MIN_LOWER_BOUND: i64 = 1;

/// Largest accepted `upper_bound - lower_bound`.
pub const MAX_RANGE: i64 = 10_000_000;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single calculation job: sum `1 / k^2` for `k` in `[lower_bound, upper_bound]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub processing_mode: ProcessingMode,
}

impl ComputeRequest {
    /// Build a request, rejecting bounds that violate [`validate_bounds`].
    pub fn new(
        lower_bound: i64,
        upper_bound: i64,
        processing_mode: ProcessingMode,
    ) -> Result<Self, CoreError> {
        validate_bounds(lower_bound, upper_bound)?;
        Ok(Self {
            lower_bound,
            upper_bound,
            processing_mode,
        })
    }

    /// Number of terms in the summed range (inclusive of both bounds).
    pub fn term_count(&self) -> i64 {
        self.upper_bound - self.lower_bound + 1
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the ordering and minimum of a pair of bounds.
pub fn validate_bounds(lower_bound: i64, upper_bound: i64) -> Result<(), CoreError> {
    if upper_bound <= lower_bound {
        return Err(CoreError::Validation(
            "Upper bound must be greater than lower bound".into(),
        ));
    }
    if lower_bound < MIN_LOWER_BOUND {
        return Err(CoreError::Validation(format!(
            "Lower bound must be at least {MIN_LOWER_BOUND}"
        )));
    }
    Ok(())
}

/// Validate that the range does not exceed [`MAX_RANGE`].
pub fn validate_range_size(lower_bound: i64, upper_bound: i64) -> Result<(), CoreError> {
    if upper_bound.saturating_sub(lower_bound) > MAX_RANGE {
        return Err(CoreError::Validation(
            "Range too large. Maximum range is 10 million".into(),
        ));
    }
    Ok(())
}

/// Parse a bound typed by a user. Surrounding whitespace is ignored.
pub fn parse_bound(label: &str, input: &str) -> Result<i64, CoreError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::Validation(format!("{label} must be a whole number")))
}
