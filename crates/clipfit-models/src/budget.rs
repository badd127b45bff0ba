//! Size budget configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default soft limit above which a source gets compressed (chat upload cap).
pub const DEFAULT_THRESHOLD_BYTES: u64 = 10_000_000;
/// Default target for compressed output. Kept below the threshold to leave
/// margin for estimation error.
pub const DEFAULT_TARGET_BYTES: u64 = 9_500_000;

/// Error returned when a budget's target does not leave margin under its threshold.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("budget target ({target_bytes} bytes) must be strictly below threshold ({threshold_bytes} bytes)")]
pub struct InvalidBudget {
    pub threshold_bytes: u64,
    pub target_bytes: u64,
}

/// Byte-size budget governing when and how aggressively a source is compressed.
///
/// `threshold_bytes` is the soft limit that triggers compression;
/// `target_bytes` is the goal for the compressed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default = "default_threshold")]
    pub threshold_bytes: u64,
    #[serde(default = "default_target")]
    pub target_bytes: u64,
}

fn default_threshold() -> u64 {
    DEFAULT_THRESHOLD_BYTES
}
fn default_target() -> u64 {
    DEFAULT_TARGET_BYTES
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            threshold_bytes: DEFAULT_THRESHOLD_BYTES,
            target_bytes: DEFAULT_TARGET_BYTES,
        }
    }
}

impl Budget {
    /// Create a validated budget.
    pub fn new(threshold_bytes: u64, target_bytes: u64) -> Result<Self, InvalidBudget> {
        if target_bytes >= threshold_bytes {
            return Err(InvalidBudget {
                threshold_bytes,
                target_bytes,
            });
        }
        Ok(Self {
            threshold_bytes,
            target_bytes,
        })
    }

    /// Whether a source of `size` bytes exceeds the soft limit.
    pub fn triggers(&self, size: u64) -> bool {
        size > self.threshold_bytes
    }
}
