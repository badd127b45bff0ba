//! Transcode execution and budget correction.

use std::path::Path;
use tokio::sync::watch;
use tracing::{info, warn};

use clipfit_models::{Budget, CompressionResult, EncodeMode, EncodeParameters};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Executes engine invocations for one compression job.
#[derive(Debug, Clone, Default)]
pub struct TranscodeExecutor {
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl TranscodeExecutor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self { cancel_rx: None }
    }

    /// Create an executor whose invocations are cancellable.
    pub fn with_cancel(cancel_rx: watch::Receiver<bool>) -> Self {
        Self {
            cancel_rx: Some(cancel_rx),
        }
    }

    /// Run one engine invocation and stat the produced artifact.
    ///
    /// Exit code 0 with the output file present on disk is the only success
    /// condition; an invocation that reported success but produced no file
    /// is surfaced as a tool failure.
    pub async fn execute(
        &self,
        source: &Path,
        params: &EncodeParameters,
        output: &Path,
    ) -> MediaResult<CompressionResult> {
        info!(
            source = %source.display(),
            output = %output.display(),
            mode = %params.mode(),
            video_kbps = params.video_kbps(),
            "Transcoding"
        );

        let cmd = FfmpegCommand::new(source, output).encode_params(params);
        let mut runner = FfmpegRunner::new();
        if let Some(rx) = &self.cancel_rx {
            runner = runner.with_cancel(rx.clone());
        }
        runner.run(&cmd).await?;

        if !output.exists() {
            return Err(MediaError::ffmpeg_failed(
                "FFmpeg reported success but produced no output file",
                None,
                None,
            ));
        }

        let metadata = tokio::fs::metadata(output).await?;

        Ok(CompressionResult {
            output_path: output.to_path_buf(),
            output_bytes: metadata.len(),
            mode: params.mode(),
            passes: 1,
        })
    }

    /// Apply at most one corrective re-encode.
    ///
    /// Triggered only when the first pass used bitrate mode and overshot the
    /// budget target. The reduced rate is derived from the parameter set
    /// carried in memory, the same output path is overwritten, and the
    /// second result is returned as-is even if it still exceeds the target.
    /// Convergence is content-dependent, so there is no loop.
    pub async fn correct_if_needed(
        &self,
        first: CompressionResult,
        source: &Path,
        params: &EncodeParameters,
        budget: &Budget,
    ) -> MediaResult<CompressionResult> {
        if first.mode != EncodeMode::Bitrate || first.output_bytes <= budget.target_bytes {
            return Ok(first);
        }

        let Some(corrected) = params.corrected() else {
            return Ok(first);
        };

        info!(
            output_bytes = first.output_bytes,
            target_bytes = budget.target_bytes,
            old_kbps = params.video_kbps(),
            new_kbps = corrected.video_kbps(),
            "First pass overshot target, re-encoding once"
        );

        let second = self
            .execute(source, &corrected, &first.output_path)
            .await?;

        if second.output_bytes > budget.target_bytes {
            warn!(
                output_bytes = second.output_bytes,
                target_bytes = budget.target_bytes,
                "Corrective pass still exceeds target, returning best effort"
            );
        }

        Ok(CompressionResult { passes: 2, ..second })
    }
}
