//! Result cache behavior through the public API.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clipfit_models::{CompressionResult, EncodeMode, Fingerprint, SourceMedia};
use clipfit_service::ResultCache;

fn fingerprint_for(path: &PathBuf) -> Fingerprint {
    SourceMedia::from_path(path).unwrap().fingerprint()
}

fn result_at(path: PathBuf) -> CompressionResult {
    std::fs::write(&path, b"encoded").unwrap();
    CompressionResult {
        output_bytes: std::fs::metadata(&path).unwrap().len(),
        output_path: path,
        mode: EncodeMode::Bitrate,
        passes: 1,
    }
}

/// Two consecutive lookups with an identical fingerprint compute once.
#[tokio::test]
async fn test_identical_fingerprint_computes_once() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("clip.mp4");
    std::fs::write(&source, b"source").unwrap();

    let cache = ResultCache::new();
    let fp = fingerprint_for(&source);
    let computes = AtomicUsize::new(0);

    let first = cache
        .get_or_compute(fp.clone(), || async {
            computes.fetch_add(1, Ordering::SeqCst);
            Ok(result_at(dir.path().join("out.mp4")))
        })
        .await
        .unwrap();

    let second = cache
        .get_or_compute(fp, || async {
            computes.fetch_add(1, Ordering::SeqCst);
            Ok(result_at(dir.path().join("other.mp4")))
        })
        .await
        .unwrap();

    assert_eq!(computes.load(Ordering::SeqCst), 1);
    assert_eq!(first.output_path, second.output_path);
}

/// Deleting the cached artifact between calls forces a recompute.
#[tokio::test]
async fn test_stale_artifact_recomputes() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("clip.mp4");
    std::fs::write(&source, b"source").unwrap();

    let cache = ResultCache::new();
    let fp = fingerprint_for(&source);
    let computes = AtomicUsize::new(0);

    let first = cache
        .get_or_compute(fp.clone(), || async {
            computes.fetch_add(1, Ordering::SeqCst);
            Ok(result_at(dir.path().join("out.mp4")))
        })
        .await
        .unwrap();

    std::fs::remove_file(&first.output_path).unwrap();

    let second = cache
        .get_or_compute(fp, || async {
            computes.fetch_add(1, Ordering::SeqCst);
            Ok(result_at(dir.path().join("out2.mp4")))
        })
        .await
        .unwrap();

    assert_eq!(computes.load(Ordering::SeqCst), 2);
    assert!(second.output_path.exists());
}

/// Concurrent lookups for one fingerprint share a single compute and all
/// receive the same path; distinct fingerprints compute independently.
#[tokio::test]
async fn test_concurrent_lookups_single_flight() {
    let dir = tempfile::tempdir().unwrap();
    let source_a = dir.path().join("a.mp4");
    let source_b = dir.path().join("b.mp4");
    std::fs::write(&source_a, b"source a").unwrap();
    std::fs::write(&source_b, b"source b").unwrap();

    let cache = Arc::new(ResultCache::new());
    let computes = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for (source, out_name) in [(&source_a, "a_out.mp4"), (&source_b, "b_out.mp4")] {
        let fp = fingerprint_for(source);
        for _ in 0..3 {
            let cache = Arc::clone(&cache);
            let computes = Arc::clone(&computes);
            let fp = fp.clone();
            let out = dir.path().join(out_name);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute(fp, || async move {
                        computes.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(result_at(out))
                    })
                    .await
                    .unwrap()
                    .output_path
            }));
        }
    }

    let mut paths = Vec::new();
    for handle in handles {
        paths.push(handle.await.unwrap());
    }

    // One compute per fingerprint
    assert_eq!(computes.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len().await, 2);

    // All callers for the same fingerprint saw the same path
    assert!(paths[0] == paths[1] && paths[1] == paths[2]);
    assert!(paths[3] == paths[4] && paths[4] == paths[5]);
    assert_ne!(paths[0], paths[3]);
}
