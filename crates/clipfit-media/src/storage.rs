//! Process-scoped working storage for produced artifacts.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

use crate::error::{MediaError, MediaResult};

/// Temporary directory owning every artifact the service produces.
///
/// Created once at service startup and removed recursively when dropped.
/// The result cache holds plain paths into this directory and must not
/// outlive it.
#[derive(Debug)]
pub struct WorkingStorage {
    temp_dir: TempDir,
}

impl WorkingStorage {
    /// Create the storage directory.
    pub fn new() -> MediaResult<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("clipfit_")
            .tempdir()
            .map_err(|e| MediaError::storage(e.to_string()))?;
        Ok(Self { temp_dir })
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Allocate a fresh artifact path for a source with the given stem.
    ///
    /// Names carry a unique tag, so paths are never reused across sources
    /// and allocation needs no locking.
    pub fn allocate(&self, stem: &str) -> PathBuf {
        let tag = Uuid::new_v4().simple().to_string();
        self.temp_dir
            .path()
            .join(format!("{}_fit_{}.mp4", stem, &tag[..8]))
    }

    /// Whether a path lives under this storage.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().starts_with(self.temp_dir.path())
    }
}
