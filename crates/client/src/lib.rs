//! Results view client for the performance comparison service.
//!
//! [`view::ResultsView`] owns the form-submission state machine and renders
//! historical results onto a [`surface::Surface`]. Network access goes
//! through the [`api::ResultsApi`] seam so the view can be driven by the
//! real HTTP client or a test double.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod surface;
pub mod view;
