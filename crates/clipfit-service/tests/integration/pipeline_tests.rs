//! End-to-end pipeline tests.
//!
//! These drive real ffmpeg/ffprobe binaries and are ignored by default.

use std::path::Path;
use std::time::Duration;

use clipfit_models::Budget;
use clipfit_service::{CompressionService, ServiceConfig};

/// Render a synthetic test clip with ffmpeg's lavfi sources.
async fn generate_source(path: &Path, secs: u32, size: &str) {
    let status = tokio::process::Command::new("ffmpeg")
        .args([
            "-y",
            "-v",
            "error",
            "-f",
            "lavfi",
            "-i",
            &format!("testsrc=duration={}:size={}:rate=30", secs, size),
            "-f",
            "lavfi",
            "-i",
            &format!("sine=frequency=440:duration={}", secs),
            "-c:v",
            "libx264",
            "-preset",
            "ultrafast",
            "-c:a",
            "aac",
            "-shortest",
        ])
        .arg(path)
        .status()
        .await
        .expect("ffmpeg must be on PATH for ignored tests");
    assert!(status.success(), "failed to render test source");
}

fn tight_config() -> ServiceConfig {
    ServiceConfig {
        // Small enough that any rendered clip triggers compression
        budget: Budget::new(100_000, 80_000).unwrap(),
        preset: "ultrafast".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires ffmpeg"]
async fn test_compress_produces_artifact_in_storage() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("clip.mp4");
    generate_source(&source, 5, "640x360").await;

    let service = CompressionService::new(tight_config()).unwrap();
    let result = service.compress(&source).await.unwrap();

    assert!(result.output_path.exists());
    assert!(service.storage().contains(&result.output_path));
    assert!(result.output_bytes > 0);
    assert!(result.passes == 1 || result.passes == 2);
}

#[tokio::test]
#[ignore = "requires ffmpeg"]
async fn test_repeated_compress_serves_cached_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("clip.mp4");
    generate_source(&source, 5, "640x360").await;

    let service = CompressionService::new(tight_config()).unwrap();
    let first = service.compress(&source).await.unwrap();
    let second = service.compress(&source).await.unwrap();

    // Same artifact, no re-encode
    assert_eq!(first.output_path, second.output_path);
}

#[tokio::test]
#[ignore = "requires ffmpeg"]
async fn test_cancelled_job_leaves_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("clip.mp4");
    // Big enough that the encode cannot finish instantly
    generate_source(&source, 30, "1280x720").await;

    let config = ServiceConfig {
        budget: Budget::new(100_000, 80_000).unwrap(),
        preset: "veryslow".to_string(),
    };
    let service = CompressionService::new(config).unwrap();

    let handle = service.submit(&source);
    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.cancel();

    let err = handle.wait().await.unwrap_err();
    assert!(err.is_cancelled());

    // Partial output was removed; the cache recorded nothing
    let leftovers: Vec<_> = std::fs::read_dir(service.storage().root())
        .unwrap()
        .collect();
    assert!(leftovers.is_empty());
}
