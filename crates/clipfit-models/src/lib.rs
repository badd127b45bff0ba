//! Shared data models for the clipfit backend.
//!
//! This crate provides Serde-serializable types for:
//! - Size budgets (threshold/target pairs)
//! - Encode parameter sets and rate-control modes
//! - Source identity and cache fingerprints
//! - Compression results

pub mod budget;
pub mod encoding;
pub mod result;
pub mod source;
pub mod utils;

// Re-export common types
pub use budget::{Budget, InvalidBudget};
pub use encoding::{EncodeParameters, RateControl};
pub use result::{CompressionResult, EncodeMode};
pub use source::{Fingerprint, SourceMedia};
pub use utils::is_video_file;
