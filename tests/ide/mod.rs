//! IDE feature tests
//!
//! Tests for:
//! - Go to definition and symbol lookup
//! - Hover
//! - Completion
//! - AnalysisHost document lifecycle

pub mod tests_host;
pub mod tests_navigation;
