//! Arena storage for the typed AST.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. The arena
//! owns every node; parent and prev/next links are plain indices and never
//! imply ownership. A tree is built once per document version and is
//! immutable afterwards, with one exception: [`AntTree::splice_unit`].

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::SrcRange;

/// Index of a node in its [`AntTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Typed node kinds, one per raw grammar kind that survives into the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Leaves
    Name,
    Number,
    StringLiteral,
    Operator,
    Keyword,
    VarModifier,
    TypeModifier,
    StmtSeparator,
    ErrorToken,

    // Trunks
    File,
    ErrorNode,
    Model,
    ModularModel,
    Function,
    Parameters,
    SimpleStmtList,
    SimpleStmt,
    Reaction,
    ReactionName,
    SpeciesList,
    Species,
    Assignment,
    Declaration,
    DeclModifiers,
    DeclItem,
    DeclAssignment,
    Annotation,
    UnitDeclaration,
    UnitAssignment,
    MaybeIn,
    VarName,
    InComp,
    Sum,
    Product,
    Power,
    Atom,
    FunctionCall,
    UnitSum,
    UnitProduct,
    Unit,
}

impl NodeKind {
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Number
                | Self::StringLiteral
                | Self::Operator
                | Self::Keyword
                | Self::VarModifier
                | Self::TypeModifier
                | Self::StmtSeparator
                | Self::ErrorToken
        )
    }

    /// Kinds that can stand for an arithmetic expression
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Number
                | Self::Sum
                | Self::Product
                | Self::Power
                | Self::Atom
                | Self::FunctionCall
        )
    }

    /// Kinds that open a named scope
    pub fn is_scope_marker(self) -> bool {
        matches!(self, Self::Model | Self::ModularModel | Self::Function)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Leaf {
        text: SmolStr,
        prev: Option<NodeId>,
        next: Option<NodeId>,
    },
    Trunk {
        children: Vec<Option<NodeId>>,
    },
}

#[derive(Debug, Clone)]
pub struct AstNode {
    pub(crate) kind: NodeKind,
    pub(crate) range: SrcRange,
    pub(crate) text_range: TextRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) data: NodeData,
}

/// A typed syntax tree for one document version.
#[derive(Debug, Clone)]
pub struct AntTree {
    pub(crate) nodes: Vec<AstNode>,
    pub(crate) root: NodeId,
}

impl AntTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// Line/column range of the node
    pub fn range(&self, id: NodeId) -> SrcRange {
        self.node(id).range
    }

    /// Byte range of the node in the source text
    pub fn text_range(&self, id: NodeId) -> TextRange {
        self.node(id).text_range
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Leaf { .. })
    }

    /// Token text of a leaf, `None` for trunks
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Leaf { text, .. } => Some(text.as_str()),
            NodeData::Trunk { .. } => None,
        }
    }

    pub(crate) fn leaf_text(&self, id: NodeId) -> SmolStr {
        match &self.node(id).data {
            NodeData::Leaf { text, .. } => text.clone(),
            NodeData::Trunk { .. } => SmolStr::default(),
        }
    }

    /// Previous leaf in document order
    pub fn prev_leaf(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::Leaf { prev, .. } => prev,
            NodeData::Trunk { .. } => None,
        }
    }

    /// Next leaf in document order
    pub fn next_leaf(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::Leaf { next, .. } => next,
            NodeData::Trunk { .. } => None,
        }
    }

    /// Child slots including the `None` placeholders of a modifier pair
    pub fn child_slots(&self, id: NodeId) -> &[Option<NodeId>] {
        match &self.node(id).data {
            NodeData::Leaf { .. } => &[],
            NodeData::Trunk { children } => children,
        }
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.child_slots(id).iter().flatten().copied()
    }

    /// Children whose parent link points back at `id`. A spliced unit is a
    /// child of its target but owned by its `has` statement.
    fn owned_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(move |child| self.parent(*child) == Some(id))
    }

    /// Pre-order walk of every node below `id` (not including `id`).
    ///
    /// Follows parent links, so each node is visited once even after a unit
    /// splice. Use [`children`](Self::children) to see spliced units.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.owned_children(id).collect();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Leaves below `id` from left to right
    pub fn leaves(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let own = self.is_leaf(id).then_some(id);
        own.into_iter()
            .chain(self.descendants(id).filter(|n| self.is_leaf(*n)))
    }

    pub fn first_leaf(&self, id: NodeId) -> Option<NodeId> {
        self.leaves(id).next()
    }

    pub fn last_leaf(&self, id: NodeId) -> Option<NodeId> {
        if self.is_leaf(id) {
            return Some(id);
        }
        self.child_slots(id)
            .iter()
            .rev()
            .flatten()
            .filter(|child| self.parent(**child) == Some(id))
            .find_map(|child| self.last_leaf(*child))
    }

    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |n| self.parent(*n))
    }

    /// Append `unit` as an extra trailing child of `target`.
    ///
    /// This is the only mutation after the tree is built: it records the unit
    /// expression of a `x has unit` statement on the assignment or
    /// declaration item that gave `x` its value. The unit node keeps its
    /// original parent, and the leaf chain is untouched, so `unit` is
    /// listed under two trunks but owned only by its `has` statement.
    pub(crate) fn splice_unit(&mut self, target: NodeId, unit: NodeId) {
        match &mut self.nodes[target.index()].data {
            NodeData::Trunk { children } => children.push(Some(unit)),
            NodeData::Leaf { .. } => panic!("cannot splice a unit into leaf {target:?}"),
        }
    }
}

/// Iterator returned by [`AntTree::descendants`]
pub struct Descendants<'t> {
    tree: &'t AntTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let first = self.stack.len();
        self.stack.extend(self.tree.owned_children(id));
        self.stack[first..].reverse();
        Some(id)
    }
}
