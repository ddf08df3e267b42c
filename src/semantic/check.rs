//! Issue collection over an analyzed tree.

use smol_str::SmolStr;

use super::issues::{Issue, IssueKind, Issues};
use super::options::AnalysisOptions;
use super::symbol_table::{QName, Scope, SymbolKind, SymbolTable};
use crate::base::SrcRange;
use crate::syntax::{AntTree, NodeId, NodeKind, SimpleStmt, Stmt, TypedNode};

/// Collect syntax warnings from error placeholders and undefined-reference
/// errors from rate laws, walking every scope of the file.
pub fn check_tree(tree: &AntTree, table: &SymbolTable, options: &AnalysisOptions) -> Issues {
    let mut checker = Checker {
        tree,
        table,
        options,
        issues: Issues::new(),
    };
    checker.check_parse_tree(tree.root(), &Scope::File);
    checker.issues
}

struct Checker<'a> {
    tree: &'a AntTree,
    table: &'a SymbolTable,
    options: &'a AnalysisOptions,
    issues: Issues,
}

impl Checker<'_> {
    fn check_parse_tree(&mut self, node: NodeId, scope: &Scope) {
        let tree = self.tree;
        for child in tree.children(node) {
            match tree.kind(child) {
                NodeKind::Model | NodeKind::ModularModel | NodeKind::Function => {
                    if let Some(inner) = Scope::of_marker(tree, child) {
                        self.check_parse_tree(child, &inner);
                    }
                }
                NodeKind::SimpleStmtList => self.check_parse_tree(child, scope),
                NodeKind::ErrorToken => {
                    let text = tree.text(child).unwrap_or_default();
                    let range = tree.range(child);
                    let issue = if text.trim().is_empty() {
                        Issue::new(IssueKind::UnexpectedNewline, SrcRange::empty(range.start))
                    } else {
                        Issue::new(
                            IssueKind::UnexpectedToken {
                                text: SmolStr::new(text),
                            },
                            range,
                        )
                    };
                    self.issues.push_syntax(issue);
                }
                NodeKind::ErrorNode => {
                    // Only an error node running into the end of the document
                    // is reported; the others are covered by their error token
                    let at_end = tree
                        .last_leaf(child)
                        .filter(|last| tree.next_leaf(*last).is_none());
                    if let Some(last) = at_end {
                        self.issues
                            .push_syntax(Issue::new(IssueKind::UnexpectedEof, tree.range(last)));
                    }
                }
                NodeKind::SimpleStmt if self.options.check_rate_laws => {
                    let rate_law = match SimpleStmt::cast(tree, child).and_then(|s| s.stmt(tree)) {
                        Some(Stmt::Reaction(reaction)) => reaction.rate_law(tree),
                        _ => None,
                    };
                    if let Some(rate_law) = rate_law {
                        self.check_rate_law(rate_law, scope);
                    }
                }
                _ => {}
            }
        }
    }

    /// Rate-law leaves alternate between operands and operators, so every
    /// even-indexed name leaf is a reference. A reference is undefined when
    /// the first record for it is neither a species nor has a value.
    fn check_rate_law(&mut self, rate_law: NodeId, scope: &Scope) {
        let tree = self.tree;
        for leaf in tree.leaves(rate_law).step_by(2) {
            if tree.kind(leaf) != NodeKind::Name {
                continue;
            }
            let qname = QName::new(scope.clone(), tree, leaf);
            let defined = self
                .table
                .get(&qname)
                .first()
                .is_some_and(|s| s.value_node.is_some() || s.kind == SymbolKind::Species);
            if !defined {
                self.issues.push_semantic(Issue::new(
                    IssueKind::UndefinedReference { name: qname.text },
                    tree.range(leaf),
                ));
            }
        }
    }
}
