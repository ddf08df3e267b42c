//! # Semantic Analysis
//!
//! Turns a typed [`AntTree`](crate::syntax::AntTree) into a scoped
//! [`SymbolTable`] and the document's [`Issues`]:
//!
//! 1. [`analyze`] collects symbols per statement kind and attaches units.
//! 2. [`check_tree`] reports recovered syntax errors and undefined rate-law
//!    references.
//! 3. [`qname_at_position`] maps an editor position to a lookup key.

mod analyzer;
mod check;
pub mod issues;
mod options;
mod position;
pub mod symbol_table;

pub use analyzer::{Analysis, analyze};
pub use check::check_tree;
pub use issues::{Issue, IssueKind, Issues, Severity};
pub use options::AnalysisOptions;
pub use position::{qname_at_position, scope_at_position};
pub use symbol_table::{
    AnnotationEntry, QName, Scope, Signature, Symbol, SymbolKind, SymbolTable,
};
