use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use crate::syntax::{AntTree, NodeId, NodeKind};

/// The lookup context of a name.
///
/// Scopes never nest: a statement belongs to exactly one model, modular
/// model or function, or to the file itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    File,
    Model(SmolStr),
    Function(SmolStr),
    ModularModel(SmolStr),
}

impl Scope {
    /// The scope opened by a model, modular model or function node; `None`
    /// for every other kind.
    pub fn of_marker(tree: &AntTree, id: NodeId) -> Option<Self> {
        let name = || {
            tree.children(id)
                .find(|c| tree.kind(*c) == NodeKind::Name)
                .map(|leaf| tree.leaf_text(leaf))
                .unwrap_or_default()
        };
        match tree.kind(id) {
            NodeKind::Model => Some(Self::Model(name())),
            NodeKind::ModularModel => Some(Self::ModularModel(name())),
            NodeKind::Function => Some(Self::Function(name())),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::File => None,
            Self::Model(name) | Self::Function(name) | Self::ModularModel(name) => Some(name),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "<file>"),
            Self::Model(name) => write!(f, "model {name}"),
            Self::Function(name) => write!(f, "function {name}"),
            Self::ModularModel(name) => write!(f, "modular model {name}"),
        }
    }
}

/// A name occurrence together with the scope it is looked up in.
///
/// `name` points at the leaf the name was read from, which may be a
/// declaring or a referencing occurrence. Equality and hashing only look at
/// the scope and the text, so any two occurrences of `k1` in one model are
/// the same key.
#[derive(Debug, Clone)]
pub struct QName {
    pub scope: Scope,
    pub name: NodeId,
    pub text: SmolStr,
}

impl QName {
    pub fn new(scope: Scope, tree: &AntTree, name: NodeId) -> Self {
        Self {
            scope,
            name,
            text: tree.leaf_text(name),
        }
    }

    /// A key for table lookups that is not tied to any occurrence.
    pub fn lookup(scope: Scope, text: impl Into<SmolStr>) -> Self {
        Self {
            scope,
            name: NodeId::new(0),
            text: text.into(),
        }
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.text == other.text
    }
}

impl Eq for QName {}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.text.hash(state);
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.scope, self.text)
    }
}
