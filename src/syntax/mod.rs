//! Typed AST for Antimony.
//!
//! The raw rowan tree from [`crate::parser`] is converted into an arena
//! ([`AntTree`]) where every node has a parent link and every leaf is
//! threaded into a left-to-right chain. Typed wrappers in [`ast`] give
//! statement-level accessors on top of it.

pub mod ast;
mod builder;
mod tree;

pub use ast::{
    Annotation, Assignment, DeclAssignment, DeclItem, DeclModifiers, Declaration, ErrorNode,
    FileNode, Function, InComp, MaybeIn, Model, ModularModel, Parameters, Reaction,
    ReactionName, SimpleStmt, SimpleStmtList, Species, SpeciesList, Stmt, TypedNode,
    UnitAssignment, UnitDeclaration, VarName, Variability,
};
pub use builder::{Mapped, build, classify};
pub use tree::{AntTree, AstNode, Descendants, NodeId, NodeKind};
