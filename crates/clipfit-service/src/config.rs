//! Service configuration.

use clipfit_models::encoding::DEFAULT_PRESET;
use clipfit_models::Budget;

use crate::error::ServiceResult;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Size budget applied to every job
    pub budget: Budget,
    /// Encoder preset
    pub preset: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            budget: Budget::default(),
            preset: DEFAULT_PRESET.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Create config from environment variables.
    ///
    /// `CLIPFIT_THRESHOLD_BYTES` / `CLIPFIT_TARGET_BYTES` override the
    /// budget (validated as a pair), `CLIPFIT_PRESET` the encoder preset.
    pub fn from_env() -> ServiceResult<Self> {
        let defaults = Budget::default();

        let threshold_bytes = std::env::var("CLIPFIT_THRESHOLD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.threshold_bytes);
        let target_bytes = std::env::var("CLIPFIT_TARGET_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.target_bytes);

        let budget = Budget::new(threshold_bytes, target_bytes)?;

        let preset =
            std::env::var("CLIPFIT_PRESET").unwrap_or_else(|_| DEFAULT_PRESET.to_string());

        Ok(Self { budget, preset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.budget.threshold_bytes, 10_000_000);
        assert_eq!(config.budget.target_bytes, 9_500_000);
        assert_eq!(config.preset, "veryfast");
    }
}
