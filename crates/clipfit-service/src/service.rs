//! Compression service facade.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use clipfit_media::WorkingStorage;
use clipfit_models::{CompressionResult, SourceMedia};

use crate::cache::ResultCache;
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::job::{run_pipeline, JobHandle};

/// Outcome of [`CompressionService::prepare`].
#[derive(Debug, Clone)]
pub enum Prepared {
    /// Source already fits under the soft limit; returned untouched.
    Original(PathBuf),
    /// Source was compressed (or served from cache).
    Compressed(CompressionResult),
}

impl Prepared {
    /// The path to hand to the caller.
    pub fn path(&self) -> &Path {
        match self {
            Prepared::Original(path) => path,
            Prepared::Compressed(result) => &result.output_path,
        }
    }
}

/// The compression service: owns working storage and the result cache,
/// and runs compression jobs against a configured budget.
///
/// Cheap to clone; clones share storage and cache. All artifacts die with
/// the last clone.
#[derive(Debug, Clone)]
pub struct CompressionService {
    config: ServiceConfig,
    storage: Arc<WorkingStorage>,
    cache: Arc<ResultCache>,
}

impl CompressionService {
    /// Create a service with its own working storage.
    pub fn new(config: ServiceConfig) -> ServiceResult<Self> {
        let storage = WorkingStorage::new()?;
        info!(
            root = %storage.root().display(),
            threshold_bytes = config.budget.threshold_bytes,
            target_bytes = config.budget.target_bytes,
            "Compression service ready"
        );
        Ok(Self {
            config,
            storage: Arc::new(storage),
            cache: Arc::new(ResultCache::new()),
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn storage(&self) -> &WorkingStorage {
        &self.storage
    }

    /// Compress a source unconditionally, memoized per fingerprint.
    pub async fn compress(&self, path: impl AsRef<Path>) -> ServiceResult<CompressionResult> {
        let source = self.load_source(path.as_ref())?;
        self.compress_source(source, None).await
    }

    /// Compress only when the source exceeds the budget's soft limit;
    /// smaller sources are handed back as-is without touching the engine
    /// or the cache.
    pub async fn prepare(&self, path: impl AsRef<Path>) -> ServiceResult<Prepared> {
        let source = self.load_source(path.as_ref())?;

        if !self.config.budget.triggers(source.size()) {
            debug!(
                source = %source.path().display(),
                size = source.size(),
                "Source within limit, no compression needed"
            );
            return Ok(Prepared::Original(source.path().to_path_buf()));
        }

        let result = self.compress_source(source, None).await?;
        Ok(Prepared::Compressed(result))
    }

    /// Submit a compression job to a worker task.
    ///
    /// Returns immediately; the result is delivered through the handle so a
    /// UI event loop driving this never blocks on the engine.
    pub fn submit(&self, path: impl Into<PathBuf>) -> JobHandle {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let id = Uuid::new_v4();
        let service = self.clone();
        let path = path.into();

        let join = tokio::spawn(async move {
            let source = service.load_source(&path)?;
            service.compress_source(source, Some(cancel_rx)).await
        });

        JobHandle {
            id,
            cancel: cancel_tx,
            join,
        }
    }

    fn load_source(&self, path: &Path) -> ServiceResult<SourceMedia> {
        SourceMedia::from_path(path)
            .map_err(|_| ServiceError::SourceMissing(path.to_path_buf()))
    }

    async fn compress_source(
        &self,
        source: SourceMedia,
        cancel_rx: Option<watch::Receiver<bool>>,
    ) -> ServiceResult<CompressionResult> {
        let fingerprint = source.fingerprint();
        let storage = Arc::clone(&self.storage);
        let budget = self.config.budget;
        let preset = self.config.preset.clone();

        self.cache
            .get_or_compute(fingerprint, move || async move {
                let output = storage.allocate(source.stem());
                let result = run_pipeline(&source, &budget, &preset, &output, cancel_rx).await?;
                info!(
                    source = %source.path().display(),
                    output = %result.output_path.display(),
                    output_bytes = result.output_bytes,
                    passes = result.passes,
                    fits = result.fits(&budget),
                    "Compression finished"
                );
                Ok(result)
            })
            .await
    }
}
