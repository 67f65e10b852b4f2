//! The results view: form validation, submission state machine and table
//! refresh.
//!
//! A submission walks `Idle -> Submitting -> Refreshing -> Idle` on success
//! and `Idle -> Submitting -> Idle` on failure. While a submission is in
//! flight further submissions are rejected with [`SubmitOutcome::Busy`].
//! Every network call is bounded by a timeout and can be aborted with
//! [`ResultsView::abort`].

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use perfcalc_core::calculation::{parse_bound, validate_bounds, ComputeRequest};
use perfcalc_core::error::CoreError;
use perfcalc_core::mode::ProcessingMode;
use tokio_util::sync::CancellationToken;

use crate::api::ResultsApi;
use crate::error::ClientError;
use crate::format::format_rows;
use crate::surface::Surface;

// ---------------------------------------------------------------------------
// Status text
// ---------------------------------------------------------------------------

pub const STATUS_CALCULATING: &str = "Calculating...";
pub const STATUS_COMPLETE: &str = "Calculation complete";
pub const STATUS_LOAD_ERROR: &str = "Error loading historical results";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub lower_bound: String,
    pub upper_bound: String,
    pub processing_mode: Option<String>,
}

impl FormInput {
    pub fn new(lower_bound: &str, upper_bound: &str, processing_mode: Option<&str>) -> Self {
        Self {
            lower_bound: lower_bound.to_string(),
            upper_bound: upper_bound.to_string(),
            processing_mode: processing_mode.map(str::to_string),
        }
    }

    /// Parse and validate into a request. Nothing here touches the network.
    pub fn to_request(&self) -> Result<ComputeRequest, CoreError> {
        let lower = parse_bound("Lower bound", &self.lower_bound)?;
        let upper = parse_bound("Upper bound", &self.upper_bound)?;
        validate_bounds(lower, upper)?;

        let mode = match self.processing_mode.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(CoreError::Validation("Processing mode is required".into()))
            }
            Some(raw) => raw.parse::<ProcessingMode>()?,
        };

        ComputeRequest::new(lower, upper, mode)
    }
}

/// Where the view is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Refreshing,
}

/// Result of [`ResultsView::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Input was invalid; an alert was raised and nothing was sent.
    Rejected(String),
    /// Another submission is still in flight; nothing was sent.
    Busy,
    /// The calculation succeeded and the table refresh ran.
    Completed {
        /// Outcome of the follow-up refresh.
        refresh: LoadOutcome,
    },
    /// The calculation request failed; the table was not refreshed.
    Failed(ClientError),
}

/// Result of [`ResultsView::load_results`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The table now shows this many rows.
    Shown(usize),
    /// The server returned no results; the table is hidden.
    Empty,
    /// Loading failed; the table kept its previous contents.
    Failed(ClientError),
}

// ---------------------------------------------------------------------------
// ResultsView
// ---------------------------------------------------------------------------

/// Owns the surface and the submission state for one results page.
///
/// Methods take `&self` so the view can be shared (e.g. behind an `Arc`)
/// between an input loop and an abort handler.
pub struct ResultsView<A: ResultsApi, S: Surface> {
    api: A,
    surface: Mutex<S>,
    phase: Mutex<Phase>,
    cancel: Mutex<CancellationToken>,
    timeout: Duration,
}

impl<A: ResultsApi, S: Surface> ResultsView<A, S> {
    pub fn new(api: A, surface: S, timeout: Duration) -> Self {
        Self {
            api,
            surface: Mutex::new(surface),
            phase: Mutex::new(Phase::Idle),
            cancel: Mutex::new(CancellationToken::new()),
            timeout,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        *lock(&self.phase)
    }

    /// Borrow the surface, e.g. to inspect a [`RecordingSurface`](crate::surface::RecordingSurface).
    pub fn surface(&self) -> MutexGuard<'_, S> {
        lock(&self.surface)
    }

    /// Abort every request currently in flight. Later requests are unaffected.
    pub fn abort(&self) {
        let mut token = lock(&self.cancel);
        token.cancel();
        *token = CancellationToken::new();
        tracing::debug!("Aborted in-flight requests");
    }

    /// Fetch historical results and re-render the table.
    pub async fn load_results(&self) -> LoadOutcome {
        match self.bounded(self.api.list_results()).await {
            Ok(results) if results.is_empty() => {
                self.surface().hide_table();
                LoadOutcome::Empty
            }
            Ok(results) => {
                let rows = format_rows(&results);
                self.surface().show_rows(&rows);
                tracing::debug!(rows = rows.len(), "Rendered historical results");
                LoadOutcome::Shown(rows.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load historical results");
                self.surface().set_status(STATUS_LOAD_ERROR);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Validate the form, submit the calculation and refresh the table.
    pub async fn submit(&self, form: &FormInput) -> SubmitOutcome {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(err) => {
                let message = validation_message(err);
                self.surface().alert(&message);
                return SubmitOutcome::Rejected(message);
            }
        };

        if !self.try_begin() {
            tracing::warn!("Submission rejected: another submission is in flight");
            return SubmitOutcome::Busy;
        }

        tracing::info!(
            lower_bound = request.lower_bound,
            upper_bound = request.upper_bound,
            mode = %request.processing_mode,
            "Submitting calculation"
        );
        self.surface().set_status(STATUS_CALCULATING);

        let outcome = match self.bounded(self.api.calculate(&request)).await {
            Ok(()) => {
                self.surface().set_status(STATUS_COMPLETE);
                self.set_phase(Phase::Refreshing);
                let refresh = self.load_results().await;
                SubmitOutcome::Completed { refresh }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Calculation request failed");
                self.surface().set_status(&format!("Error: {err}"));
                SubmitOutcome::Failed(err)
            }
        };

        self.set_phase(Phase::Idle);
        outcome
    }

    // ---- private helpers ----

    /// Move from Idle to Submitting. Returns false if not Idle.
    fn try_begin(&self) -> bool {
        let mut phase = lock(&self.phase);
        if *phase != Phase::Idle {
            return false;
        }
        *phase = Phase::Submitting;
        true
    }

    fn set_phase(&self, next: Phase) {
        let mut phase = lock(&self.phase);
        tracing::debug!(from = ?*phase, to = ?next, "Phase transition");
        *phase = next;
    }

    /// Race a request against the timeout and the current abort token.
    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        let token = lock(&self.cancel).clone();

        tokio::select! {
            biased;
            () = token.cancelled() => Err(ClientError::Cancelled),
            result = tokio::time::timeout(self.timeout, request) => {
                result.unwrap_or(Err(ClientError::Timeout(self.timeout)))
            }
        }
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Strip the error-kind prefix so alerts read as plain sentences.
fn validation_message(err: CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn form_parses_valid_input() {
        let request = FormInput::new("1", "10", Some("threading"))
            .to_request()
            .unwrap();
        assert_eq!(request.lower_bound, 1);
        assert_eq!(request.upper_bound, 10);
        assert_eq!(request.processing_mode, ProcessingMode::Threading);
    }

    #[test]
    fn form_requires_mode() {
        assert_matches!(
            FormInput::new("1", "10", None).to_request(),
            Err(CoreError::Validation(msg)) if msg == "Processing mode is required"
        );
        assert!(FormInput::new("1", "10", Some(" ")).to_request().is_err());
    }

    #[test]
    fn form_rejects_reversed_bounds_before_mode() {
        assert_matches!(
            FormInput::new("5", "3", None).to_request(),
            Err(CoreError::Validation(msg)) if msg == "Upper bound must be greater than lower bound"
        );
    }

    #[test]
    fn form_rejects_non_numeric() {
        assert!(FormInput::new("one", "10", Some("sequential"))
            .to_request()
            .is_err());
    }

    #[test]
    fn form_rejects_zero_lower_bound() {
        assert!(FormInput::new("0", "10", Some("sequential"))
            .to_request()
            .is_err());
    }
}
