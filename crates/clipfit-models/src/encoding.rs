//! Encode parameter sets handed to the transcoding engine.

use serde::{Deserialize, Serialize};

use crate::result::EncodeMode;

/// Video codec passed to the engine (H.264)
pub const VIDEO_CODEC: &str = "libx264";
/// Audio codec passed to the engine
pub const AUDIO_CODEC: &str = "aac";
/// Encoding preset
pub const DEFAULT_PRESET: &str = "veryfast";
/// Fixed audio bitrate in kbps
pub const AUDIO_KBPS: u32 = 96;
/// Minimum viable video bitrate for a first pass, in kbps
pub const MIN_VIDEO_KBPS: u32 = 150;
/// Minimum video bitrate for a corrective pass, in kbps
pub const MIN_CORRECTED_KBPS: u32 = 120;
/// Quality factor used when the source duration is unknown
pub const FALLBACK_CRF: u8 = 28;
/// Bitrate reduction applied by the corrective pass
pub const CORRECTION_FACTOR: f64 = 0.85;

/// Rate-control mode. The two variants are mutually exclusive: explicit
/// bitrates require a known source duration; quality mode relies on an
/// engine-enforced output-size cap instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RateControl {
    /// Explicit video bitrate with a short-term overshoot cap.
    Bitrate {
        video_kbps: u32,
        maxrate_kbps: u32,
        bufsize_kbps: u32,
    },
    /// Constant quality factor plus a hard cap on output size.
    Quality { crf: u8, max_output_bytes: u64 },
}

/// Fully specified parameter set for one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeParameters {
    pub rate_control: RateControl,
    /// Audio bitrate in kbps
    #[serde(default = "default_audio_kbps")]
    pub audio_kbps: u32,
    /// Encoder preset (e.g. "veryfast", "medium")
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Emit a streaming-friendly container layout (`-movflags +faststart`)
    #[serde(default = "default_faststart")]
    pub faststart: bool,
}

fn default_audio_kbps() -> u32 {
    AUDIO_KBPS
}
fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
fn default_faststart() -> bool {
    true
}

impl EncodeParameters {
    /// Bitrate-mode parameters. The maxrate cap equals the video rate and the
    /// buffer allows 2x to bound short-term overshoot.
    pub fn bitrate(video_kbps: u32) -> Self {
        Self {
            rate_control: RateControl::Bitrate {
                video_kbps,
                maxrate_kbps: video_kbps,
                bufsize_kbps: video_kbps * 2,
            },
            audio_kbps: AUDIO_KBPS,
            preset: DEFAULT_PRESET.to_string(),
            faststart: true,
        }
    }

    /// Quality-mode parameters with an engine-enforced size cap.
    pub fn quality(crf: u8, max_output_bytes: u64) -> Self {
        Self {
            rate_control: RateControl::Quality {
                crf,
                max_output_bytes,
            },
            audio_kbps: AUDIO_KBPS,
            preset: DEFAULT_PRESET.to_string(),
            faststart: true,
        }
    }

    /// The encode mode this parameter set selects.
    pub fn mode(&self) -> EncodeMode {
        match self.rate_control {
            RateControl::Bitrate { .. } => EncodeMode::Bitrate,
            RateControl::Quality { .. } => EncodeMode::Quality,
        }
    }

    /// The explicit video bitrate, if rate control is bitrate-based.
    pub fn video_kbps(&self) -> Option<u32> {
        match self.rate_control {
            RateControl::Bitrate { video_kbps, .. } => Some(video_kbps),
            RateControl::Quality { .. } => None,
        }
    }

    /// Derive the parameter set for a corrective re-encode: the video bitrate
    /// reduced to 85% of this pass's rate, floored at the corrected minimum.
    ///
    /// Returns `None` in quality mode, which never gets a corrective pass.
    pub fn corrected(&self) -> Option<Self> {
        let old_kbps = self.video_kbps()?;
        let reduced = ((old_kbps as f64) * CORRECTION_FACTOR) as u32;
        let video_kbps = reduced.max(MIN_CORRECTED_KBPS);
        Some(Self {
            rate_control: RateControl::Bitrate {
                video_kbps,
                maxrate_kbps: video_kbps,
                bufsize_kbps: video_kbps * 2,
            },
            ..self.clone()
        })
    }

    /// Convert to FFmpeg output arguments.
    pub fn to_output_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            VIDEO_CODEC.to_string(),
            "-preset".to_string(),
            self.preset.clone(),
        ];

        match self.rate_control {
            RateControl::Bitrate {
                video_kbps,
                maxrate_kbps,
                bufsize_kbps,
            } => {
                args.extend_from_slice(&[
                    "-b:v".to_string(),
                    format!("{}k", video_kbps),
                    "-maxrate".to_string(),
                    format!("{}k", maxrate_kbps),
                    "-bufsize".to_string(),
                    format!("{}k", bufsize_kbps),
                ]);
            }
            RateControl::Quality { crf, .. } => {
                args.extend_from_slice(&["-crf".to_string(), crf.to_string()]);
            }
        }

        args.extend_from_slice(&[
            "-c:a".to_string(),
            AUDIO_CODEC.to_string(),
            "-b:a".to_string(),
            format!("{}k", self.audio_kbps),
        ]);

        if self.faststart {
            args.extend_from_slice(&["-movflags".to_string(), "+faststart".to_string()]);
        }

        // The size cap goes last so the engine applies it to the muxed output.
        if let RateControl::Quality {
            max_output_bytes, ..
        } = self.rate_control
        {
            args.extend_from_slice(&["-fs".to_string(), max_output_bytes.to_string()]);
        }

        args
    }
}
