//! Parser tests
//!
//! Tests for:
//! - Lossless raw trees on valid and broken input
//! - Error recovery at checkpoints

pub mod tests_recovery;
