//! Small shared helpers.

use std::path::Path;

/// File extensions recognized as video sources.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "webm", "m4v"];

/// Whether a path looks like a supported video file.
pub fn is_video_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            VIDEO_EXTENSIONS.iter().any(|v| *v == e)
        })
        .unwrap_or(false)
}
