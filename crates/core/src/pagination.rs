//! Pagination defaults and clamping helpers for result listings.

/// Default number of results returned by a listing.
pub const DEFAULT_RESULTS_LIMIT: i64 = 100;

/// Maximum number of results returned by a listing.
pub const MAX_RESULTS_LIMIT: i64 = 1_000;

/// Clamp an optional limit into `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp an optional offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_when_missing() {
        assert_eq!(
            clamp_limit(None, DEFAULT_RESULTS_LIMIT, MAX_RESULTS_LIMIT),
            DEFAULT_RESULTS_LIMIT
        );
    }

    #[test]
    fn limit_is_clamped_both_ways() {
        assert_eq!(clamp_limit(Some(0), 100, 1_000), 1);
        assert_eq!(clamp_limit(Some(-5), 100, 1_000), 1);
        assert_eq!(clamp_limit(Some(5_000), 100, 1_000), 1_000);
        assert_eq!(clamp_limit(Some(25), 100, 1_000), 25);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
