//! # stibium-base
//!
//! Semantic core for Antimony model files: parsing, typed AST, symbol
//! table, diagnostics and editor queries.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AntFile queries (goto, hover, completion), AnalysisHost
//!   ↓
//! semantic  → Symbol table, analyzer passes, issues, position queries
//!   ↓
//! syntax    → Typed AST arena built from the raw tree
//!   ↓
//! parser    → Logos lexer, recovering parser, rowan raw tree
//!   ↓
//! base      → Primitives (SrcPosition, SrcRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → semantic → ide)
// ============================================================================

/// Foundation types: positions, ranges, line index
pub mod base;

/// Parser: Logos lexer, checkpointing recursive-descent parser
pub mod parser;

/// Syntax: typed AST arena and node wrappers
pub mod syntax;

/// Semantic analysis: scopes, symbol table, issues
pub mod semantic;

/// IDE features: goto, hover, completion, document host
pub mod ide;

pub use base::{LineIndex, SrcPosition, SrcRange, TextRange, TextSize};
pub use ide::{AnalysisHost, AntFile};
pub use semantic::{AnalysisOptions, Issue, IssueKind, QName, Scope, Severity, Symbol, SymbolKind};
