//! FFprobe duration lookup.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// FFprobe JSON output, restricted to the container-level format section.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Probe a source's duration in seconds.
///
/// An unknown duration is a legitimate input for the bitrate estimator, not
/// an error: a missing tool, non-zero exit or unparsable output all degrade
/// to `None`. Single attempt, no retries.
pub async fn probe_duration(path: impl AsRef<Path>) -> Option<f64> {
    let path = path.as_ref();
    match run_ffprobe(path).await {
        Ok(duration) => Some(duration),
        Err(e) => {
            debug!("ffprobe failed for {}: {}", path.display(), e);
            None
        }
    }
}

async fn run_ffprobe(path: &Path) -> MediaResult<f64> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_entries",
            "format=duration",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "FFprobe exited with non-zero status",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

    let duration = probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite())
        .ok_or_else(|| MediaError::ffprobe_failed("no duration in probe output", None))?;

    Ok(duration)
}
