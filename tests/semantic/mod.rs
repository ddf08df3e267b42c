//! Semantic analysis tests
//!
//! Tests for:
//! - Scope separation and record kinds on whole documents
//! - Properties that hold for any document: resolution of declared
//!   names, undefined-reference reporting, determinism, one syntax issue
//!   per line

pub mod tests_documents;
pub mod tests_properties;
