//! Single-flight result cache keyed by source fingerprint.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use clipfit_models::{CompressionResult, Fingerprint};

use crate::error::ServiceResult;

type Slot = Arc<Mutex<Option<CompressionResult>>>;

/// Process-lifetime cache of compression results.
///
/// Unbounded: the working set is one artifact per source compressed this
/// session, and artifact lifetime is governed by working storage. The only
/// eviction is existence-checking, so a deleted artifact reads as a miss.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: Mutex<HashMap<Fingerprint, Slot>>,
}

impl ResultCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fingerprint or run `compute` to fill it.
    ///
    /// The per-fingerprint slot lock serializes computes: a second request
    /// for a fingerprint already being computed waits for the in-flight
    /// result instead of starting a duplicate engine invocation. Requests
    /// for different fingerprints proceed independently. A failed or
    /// cancelled compute stores nothing.
    pub async fn get_or_compute<F, Fut>(
        &self,
        fingerprint: Fingerprint,
        compute: F,
    ) -> ServiceResult<CompressionResult>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ServiceResult<CompressionResult>>,
    {
        let slot = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(fingerprint).or_default())
        };

        let mut guard = slot.lock().await;

        if let Some(cached) = guard.as_ref() {
            if cached.output_path.exists() {
                debug!(path = %cached.output_path.display(), "Cache hit");
                return Ok(cached.clone());
            }
            debug!(
                path = %cached.output_path.display(),
                "Cached artifact gone, evicting stale entry"
            );
            *guard = None;
        }

        let result = compute().await?;
        *guard = Some(result.clone());
        Ok(result)
    }

    /// Number of fingerprints ever admitted (filled or in flight).
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
