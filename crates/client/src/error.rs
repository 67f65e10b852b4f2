use std::time::Duration;

/// Failures of a single network round trip made by the results view.
///
/// Input validation problems never appear here; they are reported to the
/// user through [`Surface::alert`](crate::surface::Surface::alert) before any
/// request is made.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// `POST /api/calculate` failed: non-2xx status or transport error.
    #[error("Server error: {0}")]
    RequestFailed(String),

    /// `GET /api/results` failed: non-2xx status, transport or parse error.
    #[error("Error loading historical results: {0}")]
    LoadFailed(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The request was aborted through the view's abort handle.
    #[error("Request cancelled")]
    Cancelled,
}
