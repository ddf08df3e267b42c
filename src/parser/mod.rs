//! Rowan-based recovering parser for Antimony
//!
//! This module produces the raw syntax tree the semantic core consumes:
//! - **logos** for fast lexing
//! - **rowan** for the lossless raw tree
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → event buffer, rewound to checkpoints on error
//!     ↓
//! GreenNode tree (immutable) with ERROR_NODE / ERROR_TOKEN placeholders
//!     ↓
//! syntax::build → typed AST arena
//! ```

mod checkpoint;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;
mod syntax_kind;

pub use checkpoint::{Checkpoint, is_checkpoint};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{AntimonyLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
