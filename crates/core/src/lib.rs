//! Core domain types and pure logic for the performance comparison service.
//!
//! Shared by the HTTP server, the persistence layer and the results client.

pub mod calculation;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod mode;
pub mod pagination;
pub mod system;
pub mod types;
pub mod usage;
