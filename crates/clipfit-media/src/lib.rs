//! FFmpeg CLI wrapper for size-constrained transcoding.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Cancellation support via tokio
//! - Duration probing through ffprobe (degrades to "unknown", never fails)
//! - Duration-aware bitrate estimation with a quality-factor fallback
//! - Transcode execution with a single bounded corrective pass
//! - Process-scoped working storage for produced artifacts

pub mod command;
pub mod error;
pub mod estimate;
pub mod probe;
pub mod storage;
pub mod transcode;

pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use estimate::estimate;
pub use probe::probe_duration;
pub use storage::WorkingStorage;
pub use transcode::TranscodeExecutor;
