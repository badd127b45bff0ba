//! Integration test runner.
//!
//! Run all integration tests:
//!   cargo test --test integration
//!
//! Run tests that require an ffmpeg/ffprobe installation:
//!   cargo test --test integration -- --ignored

mod integration {
    pub mod cache_tests;
    pub mod pipeline_tests;
    pub mod service_tests;
}

pub use integration::*;
