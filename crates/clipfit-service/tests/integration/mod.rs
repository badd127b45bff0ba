//! Integration tests for the compression service.
//!
//! The pipeline tests require ffmpeg/ffprobe on PATH and are `#[ignore]`d;
//! run them with: `cargo test --test integration -- --ignored`

pub mod cache_tests;
pub mod pipeline_tests;
pub mod service_tests;
