//! Service-level behavior that needs no external tools.

use clipfit_models::{is_video_file, Budget};
use clipfit_service::{CompressionService, Prepared, ServiceConfig, ServiceError};

/// Sources at or under the soft limit are passed through untouched.
#[tokio::test]
async fn test_prepare_threshold_gate() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("small.mp4");
    std::fs::write(&source, vec![0u8; 4096]).unwrap();

    let service = CompressionService::new(ServiceConfig::default()).unwrap();

    match service.prepare(&source).await.unwrap() {
        Prepared::Original(path) => {
            assert_eq!(path, source);
            assert!(path.exists());
        }
        Prepared::Compressed(_) => panic!("source under threshold must not be transcoded"),
    }
}

#[tokio::test]
async fn test_missing_source_surfaces_typed_error() {
    let service = CompressionService::new(ServiceConfig::default()).unwrap();

    let err = service.compress("/no/such/clip.mp4").await.unwrap_err();
    assert!(matches!(err, ServiceError::SourceMissing(_)));

    let err = service.prepare("/no/such/clip.mp4").await.unwrap_err();
    assert!(matches!(err, ServiceError::SourceMissing(_)));
}

#[test]
fn test_video_extension_gate() {
    assert!(is_video_file("clip.mp4"));
    assert!(is_video_file("clip.MOV"));
    assert!(!is_video_file("clip.txt"));
}

#[test]
fn test_budget_pair_validation() {
    assert!(Budget::new(10_000_000, 9_500_000).is_ok());
    assert!(Budget::new(9_500_000, 9_500_000).is_err());
}

/// Working storage is created per service and removed when the last clone
/// drops, taking artifacts with it.
#[tokio::test]
async fn test_storage_lifecycle_follows_service() {
    let service = CompressionService::new(ServiceConfig::default()).unwrap();
    let root = service.storage().root().to_path_buf();
    assert!(root.exists());

    let clone = service.clone();
    drop(service);
    assert!(root.exists(), "storage must survive while a clone lives");

    drop(clone);
    assert!(!root.exists(), "storage must be removed with the service");
}
