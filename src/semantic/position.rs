//! Position → qualified name.

use super::symbol_table::{QName, Scope};
use crate::base::SrcPosition;
use crate::syntax::AntTree;

/// The qualified name of the leaf under `position`.
///
/// Descends from the root into the child containing `position` until a
/// leaf is reached, remembering the model, modular model or function it
/// passed through; that marker's scope (or the file scope) is paired with
/// the leaf. Returns `None` when some level has no child containing the
/// position, e.g. on whitespace or past the end of a line.
///
/// # Panics
///
/// If two scope markers lie on one path, which the grammar rules out.
pub fn qname_at_position(tree: &AntTree, position: SrcPosition) -> Option<QName> {
    let mut node = tree.root();
    let mut marker: Option<Scope> = None;

    while !tree.is_leaf(node) {
        if let Some(scope) = Scope::of_marker(tree, node) {
            assert!(
                marker.is_none(),
                "scope {scope} nested inside {marker:?}: models and functions cannot nest"
            );
            marker = Some(scope);
        }
        node = tree
            .children(node)
            .find(|child| tree.range(*child).contains(position))?;
    }

    tracing::trace!(%position, leaf = ?node, "resolved position");
    Some(QName::new(marker.unwrap_or(Scope::File), tree, node))
}

/// The scope enclosing `position`, even when no leaf sits under it.
pub fn scope_at_position(tree: &AntTree, position: SrcPosition) -> Scope {
    let mut node = tree.root();
    loop {
        if let Some(scope) = Scope::of_marker(tree, node) {
            return scope;
        }
        match tree
            .children(node)
            .find(|child| tree.range(*child).contains(position))
        {
            Some(child) => node = child,
            None => return Scope::File,
        }
    }
}
