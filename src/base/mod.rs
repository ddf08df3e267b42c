//! Foundation types for the Stibium toolchain.
//!
//! This module provides fundamental types used throughout the analyzer:
//! - [`SrcPosition`], [`SrcRange`] - 1-based line/column positions for AST nodes
//! - [`LineIndex`] - byte offset to line/column conversion
//!
//! This module has NO dependencies on other stibium modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{SrcPosition, SrcRange};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
