/// Scoped, append-only registry of every name in an Antimony document
mod scope;
mod symbol;
mod table;

pub use scope::{QName, Scope};
pub use symbol::{AnnotationEntry, Signature, Symbol, SymbolKind};
pub use table::SymbolTable;

#[cfg(test)]
mod tests;
