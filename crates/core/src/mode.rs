//! Processing modes understood by the calculation engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Server-side execution strategy for a calculation.
///
/// Serialized verbatim as `sequential`, `threading` or `multiprocessing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    Sequential,
    Threading,
    Multiprocessing,
}

impl ProcessingMode {
    /// Every mode, in the order they are offered to users.
    pub const ALL: [ProcessingMode; 3] = [
        ProcessingMode::Sequential,
        ProcessingMode::Threading,
        ProcessingMode::Multiprocessing,
    ];

    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Threading => "threading",
            Self::Multiprocessing => "multiprocessing",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid processing mode '{s}'. Must be one of: sequential, threading, multiprocessing"
                ))
            })
    }
}
