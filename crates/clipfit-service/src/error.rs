//! Service error types.

use std::path::PathBuf;
use thiserror::Error;

use clipfit_media::MediaError;
use clipfit_models::InvalidBudget;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Source not found: {0}")]
    SourceMissing(PathBuf),

    #[error("Job failed: {0}")]
    JobFailed(String),

    #[error("Invalid budget: {0}")]
    Budget(#[from] InvalidBudget),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn job_failed(msg: impl Into<String>) -> Self {
        Self::JobFailed(msg.into())
    }

    /// Whether this error came from an abandoned job.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ServiceError::Media(MediaError::Cancelled))
    }

    /// The engine's diagnostic output, when the failure carries one.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            ServiceError::Media(MediaError::FfmpegFailed { stderr, .. }) => stderr.as_deref(),
            _ => None,
        }
    }
}
