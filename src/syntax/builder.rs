//! Raw tree → typed AST.
//!
//! [`build`] maps every raw node and token to exactly one typed node through
//! [`classify`], an exhaustive match over [`SyntaxKind`]. Adding a grammar
//! kind without a typed counterpart fails to compile; a kind showing up in
//! the wrong role (a token kind as a node or the reverse) panics, since it
//! means the parser and this table have drifted apart.
//!
//! Construction happens in three passes: create nodes bottom-up, assign
//! parent links, then thread the leaves into one left-to-right chain.

use smol_str::SmolStr;
use text_size::TextRange;

use super::tree::{AntTree, AstNode, NodeData, NodeId, NodeKind};
use crate::base::LineIndex;
use crate::parser::{SyntaxElement, SyntaxKind, SyntaxNode};

/// How a raw kind materializes in the typed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapped {
    Leaf(NodeKind),
    Trunk(NodeKind),
    /// Trivia carries no meaning past the raw tree
    Skip,
}

/// The kind → typed kind table.
pub fn classify(kind: SyntaxKind) -> Mapped {
    use Mapped::*;
    match kind {
        SyntaxKind::WHITESPACE | SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT => Skip,

        SyntaxKind::NEWLINE | SyntaxKind::SEMICOLON => Leaf(NodeKind::StmtSeparator),
        SyntaxKind::NAME => Leaf(NodeKind::Name),
        SyntaxKind::NUMBER => Leaf(NodeKind::Number),
        SyntaxKind::STRING => Leaf(NodeKind::StringLiteral),
        SyntaxKind::ARROW
        | SyntaxKind::EQ
        | SyntaxKind::COLON
        | SyntaxKind::COMMA
        | SyntaxKind::PLUS
        | SyntaxKind::MINUS
        | SyntaxKind::STAR
        | SyntaxKind::SLASH
        | SyntaxKind::CARET
        | SyntaxKind::DOLLAR
        | SyntaxKind::L_PAREN
        | SyntaxKind::R_PAREN => Leaf(NodeKind::Operator),
        SyntaxKind::MODEL_KW
        | SyntaxKind::END_KW
        | SyntaxKind::FUNCTION_KW
        | SyntaxKind::UNIT_KW
        | SyntaxKind::HAS_KW
        | SyntaxKind::IN_KW
        | SyntaxKind::ANNOT_KEYWORD => Leaf(NodeKind::Keyword),
        SyntaxKind::VAR_MODIFIER => Leaf(NodeKind::VarModifier),
        SyntaxKind::TYPE_MODIFIER => Leaf(NodeKind::TypeModifier),
        SyntaxKind::LEX_ERROR | SyntaxKind::ERROR_TOKEN => Leaf(NodeKind::ErrorToken),

        SyntaxKind::ROOT => Trunk(NodeKind::File),
        SyntaxKind::ERROR_NODE => Trunk(NodeKind::ErrorNode),
        SyntaxKind::MODEL => Trunk(NodeKind::Model),
        SyntaxKind::MODULAR_MODEL => Trunk(NodeKind::ModularModel),
        SyntaxKind::FUNCTION => Trunk(NodeKind::Function),
        SyntaxKind::PARAMETERS => Trunk(NodeKind::Parameters),
        SyntaxKind::SIMPLE_STMT_LIST => Trunk(NodeKind::SimpleStmtList),
        SyntaxKind::SIMPLE_STMT => Trunk(NodeKind::SimpleStmt),
        SyntaxKind::REACTION => Trunk(NodeKind::Reaction),
        SyntaxKind::REACTION_NAME => Trunk(NodeKind::ReactionName),
        SyntaxKind::SPECIES_LIST => Trunk(NodeKind::SpeciesList),
        SyntaxKind::SPECIES => Trunk(NodeKind::Species),
        SyntaxKind::ASSIGNMENT => Trunk(NodeKind::Assignment),
        SyntaxKind::DECLARATION => Trunk(NodeKind::Declaration),
        SyntaxKind::DECL_MODIFIERS => Trunk(NodeKind::DeclModifiers),
        SyntaxKind::DECL_ITEM => Trunk(NodeKind::DeclItem),
        SyntaxKind::DECL_ASSIGNMENT => Trunk(NodeKind::DeclAssignment),
        SyntaxKind::ANNOTATION => Trunk(NodeKind::Annotation),
        SyntaxKind::UNIT_DECLARATION => Trunk(NodeKind::UnitDeclaration),
        SyntaxKind::UNIT_ASSIGNMENT => Trunk(NodeKind::UnitAssignment),
        SyntaxKind::MAYBE_IN => Trunk(NodeKind::MaybeIn),
        SyntaxKind::VAR_NAME => Trunk(NodeKind::VarName),
        SyntaxKind::IN_COMP => Trunk(NodeKind::InComp),
        SyntaxKind::SUM => Trunk(NodeKind::Sum),
        SyntaxKind::PRODUCT => Trunk(NodeKind::Product),
        SyntaxKind::POWER => Trunk(NodeKind::Power),
        SyntaxKind::ATOM => Trunk(NodeKind::Atom),
        SyntaxKind::FUNCTION_CALL => Trunk(NodeKind::FunctionCall),
        SyntaxKind::UNIT_SUM => Trunk(NodeKind::UnitSum),
        SyntaxKind::UNIT_PRODUCT => Trunk(NodeKind::UnitProduct),
        SyntaxKind::UNIT => Trunk(NodeKind::Unit),

        SyntaxKind::__LAST => panic!("__LAST is not a real syntax kind"),
    }
}

/// Build the typed tree for a raw tree rooted at `root`.
pub fn build(root: &SyntaxNode, line_index: &LineIndex) -> AntTree {
    let mut builder = TreeBuilder {
        nodes: Vec::new(),
        line_index,
    };
    let root_id = builder.node(root);
    let mut tree = AntTree {
        nodes: builder.nodes,
        root: root_id,
    };
    set_parents(&mut tree, root_id);
    set_leaf_links(&mut tree);
    tracing::debug!(nodes = tree.len(), "built typed tree");
    tree
}

struct TreeBuilder<'a> {
    nodes: Vec<AstNode>,
    line_index: &'a LineIndex,
}

impl TreeBuilder<'_> {
    fn push(&mut self, node: AstNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn element(&mut self, element: SyntaxElement) -> Option<NodeId> {
        match element {
            rowan::NodeOrToken::Node(node) => Some(self.node(&node)),
            rowan::NodeOrToken::Token(token) => match classify(token.kind()) {
                Mapped::Skip => None,
                Mapped::Leaf(kind) => Some(self.push(AstNode {
                    kind,
                    range: self.line_index.range(token.text_range()),
                    text_range: token.text_range(),
                    parent: None,
                    data: NodeData::Leaf {
                        text: SmolStr::new(token.text()),
                        prev: None,
                        next: None,
                    },
                })),
                Mapped::Trunk(kind) => {
                    panic!("node kind {kind:?} appeared as a token in the raw tree")
                }
            },
        }
    }

    fn node(&mut self, node: &SyntaxNode) -> NodeId {
        let kind = match classify(node.kind()) {
            Mapped::Trunk(kind) => kind,
            other => panic!("token kind {:?} appeared as a node ({other:?})", node.kind()),
        };

        let mut children: Vec<Option<NodeId>> = node
            .children_with_tokens()
            .filter_map(|element| self.element(element))
            .map(Some)
            .collect();

        // A modifier pair always has two slots: (variability, type)
        if kind == NodeKind::DeclModifiers {
            let find = |wanted: NodeKind| {
                children
                    .iter()
                    .flatten()
                    .copied()
                    .find(|id| self.nodes[id.index()].kind == wanted)
            };
            children = vec![find(NodeKind::VarModifier), find(NodeKind::TypeModifier)];
        }

        let text_range = span_of(&self.nodes, &children).unwrap_or_else(|| {
            let start = node.text_range().start();
            TextRange::empty(start)
        });
        self.push(AstNode {
            kind,
            range: self.line_index.range(text_range),
            text_range,
            parent: None,
            data: NodeData::Trunk { children },
        })
    }
}

/// Byte span covering the first through last present child
fn span_of(nodes: &[AstNode], children: &[Option<NodeId>]) -> Option<TextRange> {
    let mut present = children.iter().flatten();
    let first = present.next()?;
    let last = present.last().unwrap_or(first);
    Some(TextRange::new(
        nodes[first.index()].text_range.start(),
        nodes[last.index()].text_range.end(),
    ))
}

fn set_parents(tree: &mut AntTree, root: NodeId) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let children: Vec<NodeId> = tree.children(id).collect();
        for child in children {
            tree.nodes[child.index()].parent = Some(id);
            stack.push(child);
        }
    }
}

fn set_leaf_links(tree: &mut AntTree) {
    let leaves: Vec<NodeId> = tree.leaves(tree.root()).collect();
    for pair in leaves.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        if let NodeData::Leaf { next, .. } = &mut tree.nodes[left.index()].data {
            *next = Some(right);
        }
        if let NodeData::Leaf { prev, .. } = &mut tree.nodes[right.index()].data {
            *prev = Some(left);
        }
    }
}
