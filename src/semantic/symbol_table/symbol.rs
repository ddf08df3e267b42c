use smol_str::SmolStr;

use crate::syntax::NodeId;

/// The role a name plays in a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Species,
    Compartment,
    Parameter,
    Reaction,
    Function,
    ModularModel,
}

impl SymbolKind {
    /// Label shown to users, e.g. in hover text
    pub fn label(self) -> &'static str {
        match self {
            Self::Species => "species",
            Self::Compartment => "compartment",
            Self::Parameter => "parameter",
            Self::Reaction => "reaction",
            Self::Function => "function",
            Self::ModularModel => "model",
        }
    }
}

/// `S1 identity "http://..."` recorded against `S1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationEntry {
    pub keyword: SmolStr,
    pub uri: SmolStr,
    /// The annotation statement
    pub node: NodeId,
}

/// One role of a name. A name can carry several records, e.g. a species
/// that was later annotated has a Species and a Parameter record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    /// Name leaf the record was inserted with
    pub name: NodeId,
    pub def_node: Option<NodeId>,
    /// Assignment, declaration item or declaration assignment giving the value
    pub value_node: Option<NodeId>,
    pub annotation: Option<AnnotationEntry>,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: NodeId) -> Self {
        Self {
            kind,
            name,
            def_node: None,
            value_node: None,
            annotation: None,
        }
    }

    pub fn with_def(mut self, node: NodeId) -> Self {
        self.def_node = Some(node);
        self
    }

    pub fn with_value(mut self, node: Option<NodeId>) -> Self {
        self.value_node = node;
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationEntry) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Leaf that navigation jumps to
    pub fn def_name(&self) -> NodeId {
        self.name
    }
}

/// Call shape of a function or modular model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    Function {
        params: Vec<SmolStr>,
    },
    /// Each parameter with the records it resolved to inside the model
    ModularModel {
        params: Vec<(SmolStr, Vec<Symbol>)>,
    },
}
