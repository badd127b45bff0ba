//! Compression job results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::budget::Budget;

/// Which rate-control mode an encode used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodeMode {
    Bitrate,
    Quality,
}

impl std::fmt::Display for EncodeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeMode::Bitrate => write!(f, "bitrate"),
            EncodeMode::Quality => write!(f, "quality"),
        }
    }
}

/// Outcome of a compression job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionResult {
    /// Path to the produced artifact (inside working storage)
    pub output_path: PathBuf,
    /// Size of the artifact in bytes
    pub output_bytes: u64,
    /// Rate-control mode of the final pass
    pub mode: EncodeMode,
    /// Number of encode passes performed (1, or 2 after a corrective pass)
    pub passes: u8,
}

impl CompressionResult {
    /// Whether the artifact landed at or under the budget's target.
    pub fn fits(&self, budget: &Budget) -> bool {
        self.output_bytes <= budget.target_bytes
    }
}
