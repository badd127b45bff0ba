//! Compression pipeline and background job handles.

use std::path::Path;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use clipfit_media::{estimate, probe_duration, TranscodeExecutor};
use clipfit_models::{Budget, CompressionResult, SourceMedia};

use crate::error::{ServiceError, ServiceResult};

/// Run the full pipeline for one job: probe, estimate, execute, and apply
/// the corrective pass when the first attempt overshoots.
pub(crate) async fn run_pipeline(
    source: &SourceMedia,
    budget: &Budget,
    preset: &str,
    output: &Path,
    cancel_rx: Option<watch::Receiver<bool>>,
) -> ServiceResult<CompressionResult> {
    let duration = probe_duration(source.path()).await;

    let mut params = estimate(duration, budget);
    params.preset = preset.to_string();

    let executor = match cancel_rx {
        Some(rx) => TranscodeExecutor::with_cancel(rx),
        None => TranscodeExecutor::new(),
    };

    let first = executor.execute(source.path(), &params, output).await?;
    let result = executor
        .correct_if_needed(first, source.path(), &params, budget)
        .await?;

    Ok(result)
}

/// Handle to a compression job running on a worker task.
///
/// The result is delivered through the handle; the submitting context never
/// blocks on the engine.
#[derive(Debug)]
pub struct JobHandle {
    pub(crate) id: Uuid,
    pub(crate) cancel: watch::Sender<bool>,
    pub(crate) join: JoinHandle<ServiceResult<CompressionResult>>,
}

impl JobHandle {
    /// Unique id of this job.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Request termination.
    ///
    /// The spawned engine process is killed and its partial output removed;
    /// the cache records nothing for a cancelled job. `wait()` then returns
    /// a cancellation error.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Await the job's result.
    pub async fn wait(self) -> ServiceResult<CompressionResult> {
        self.join
            .await
            .map_err(|e| ServiceError::job_failed(format!("worker task terminated: {}", e)))?
    }
}
