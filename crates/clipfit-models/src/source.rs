//! Source file identity and cache fingerprints.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A source media file, read once at job submission.
///
/// Identity is the absolute path plus size and modification time; those
/// three together form the cache [`Fingerprint`], so a source that is
/// overwritten in place is treated as new content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMedia {
    path: PathBuf,
    size: u64,
    modified: SystemTime,
}

impl SourceMedia {
    /// Read a source's identity from disk.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(Self {
            path,
            size: metadata.len(),
            modified: metadata.modified()?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// The file stem used for naming derived artifacts.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("clip")
    }

    /// Derive the cache key for this source.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            path: self.path.clone(),
            size: self.size,
            modified: self.modified,
        }
    }
}

/// Cache key for a source: path + size + modification time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    path: PathBuf,
    size: u64,
    modified: SystemTime,
}

impl Fingerprint {
    pub fn path(&self) -> &Path {
        &self.path
    }
}
