//! Duration-aware bitrate estimation.

use clipfit_models::encoding::{AUDIO_KBPS, FALLBACK_CRF, MIN_VIDEO_KBPS};
use clipfit_models::{Budget, EncodeParameters};

/// Compute encode parameters for a source.
///
/// With a known positive duration the byte target converts directly into an
/// explicit video bitrate: audio is fixed at [`AUDIO_KBPS`] and the video
/// rate takes the remainder of the bit budget, floored at
/// [`MIN_VIDEO_KBPS`] to avoid degenerate encodes.
///
/// Without one, bitrate cannot be derived analytically, so the fallback is
/// a constant quality factor plus the engine's own hard cap on output size.
pub fn estimate(duration_secs: Option<f64>, budget: &Budget) -> EncodeParameters {
    match duration_secs {
        Some(duration) if duration > 0.0 => {
            let total_target_bits = (budget.target_bytes * 8) as f64;
            let video_kbps = (total_target_bits / duration / 1000.0 - AUDIO_KBPS as f64) as i64;
            let video_kbps = video_kbps.max(MIN_VIDEO_KBPS as i64) as u32;
            EncodeParameters::bitrate(video_kbps)
        }
        _ => EncodeParameters::quality(FALLBACK_CRF, budget.target_bytes),
    }
}
