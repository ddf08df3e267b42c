//! Hover information implementation.

use crate::base::{SrcPosition, SrcRange};
use crate::semantic::Symbol;
use crate::syntax::{Assignment, DeclAssignment, DeclItem, NodeId, NodeKind, TypedNode};

use super::file::AntFile;

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// Range of the hovered token.
    pub range: SrcRange,
}

/// Describe the first record of the token under `position`.
pub fn hover(file: &AntFile, position: SrcPosition) -> Option<HoverResult> {
    let qname = file.resolve(position)?;
    let records = file.table().get(&qname);
    let symbol = records.first()?;

    let mut contents = format!("```\n({}) {}", symbol.kind.label(), qname.text);
    if let Some((value, unit)) = value_text(file, symbol) {
        contents.push_str(&format!("\n{} = {value}", qname.text));
        if let Some(unit) = unit {
            contents.push(' ');
            contents.push_str(unit);
        }
    }
    contents.push_str("\n```");

    let annotations = file.table().annotations(&qname);
    if !annotations.is_empty() {
        contents.push_str("\n\n");
        let lines: Vec<String> = annotations
            .iter()
            .map(|a| format!("- {} <{}>", a.keyword, a.uri))
            .collect();
        contents.push_str(&lines.join("\n"));
    }

    Some(HoverResult {
        contents,
        range: file.tree().range(qname.name),
    })
}

/// Source text of the symbol's value expression and of its unit, if any
fn value_text<'f>(file: &'f AntFile, symbol: &Symbol) -> Option<(&'f str, Option<&'f str>)> {
    let tree = file.tree();
    let node = symbol.value_node?;
    let (value, unit) = match tree.kind(node) {
        NodeKind::Assignment => {
            let assignment = Assignment::cast(tree, node)?;
            (assignment.value(tree)?, assignment.unit(tree))
        }
        NodeKind::DeclItem => {
            let assignment = DeclItem::cast(tree, node)?.assignment(tree)?;
            (assignment.value(tree)?, assignment.unit(tree))
        }
        NodeKind::DeclAssignment => {
            let assignment = DeclAssignment::cast(tree, node)?;
            (assignment.value(tree)?, assignment.unit(tree))
        }
        _ => return None,
    };
    Some((source(file, value), unit.map(|u| source(file, u))))
}

fn source(file: &AntFile, node: NodeId) -> &str {
    &file.text()[file.tree().text_range(node)]
}
