use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use smol_str::{SmolStr, format_smolstr};

use super::scope::{QName, Scope};
use super::symbol::{AnnotationEntry, Signature, Symbol, SymbolKind};
use crate::syntax::NodeId;

/// Append-only map from qualified names to their records.
///
/// Records for one name keep insertion order and are never replaced, so a
/// name's first record is always the role it was introduced with.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: IndexMap<QName, Vec<Symbol>>,
    annotations: IndexMap<QName, Vec<AnnotationEntry>>,
    signatures: FxHashMap<QName, Signature>,
    /// Last counter handed out per prefix by `get_unique_name`
    unique_counters: FxHashMap<SmolStr, u32>,
    separator: SmolStr,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::with_separator(SmolStr::new_static("_"))
    }

    /// Table whose generated names join prefix and counter with `separator`
    pub fn with_separator(separator: SmolStr) -> Self {
        Self {
            symbols: IndexMap::new(),
            annotations: IndexMap::new(),
            signatures: FxHashMap::default(),
            unique_counters: FxHashMap::default(),
            separator,
        }
    }

    /// Append a record for `qname`. Earlier records stay in place.
    pub fn insert(
        &mut self,
        qname: QName,
        kind: SymbolKind,
        def_node: Option<NodeId>,
        value_node: Option<NodeId>,
    ) {
        let mut symbol = Symbol::new(kind, qname.name).with_value(value_node);
        symbol.def_node = def_node;
        self.insert_symbol(qname, symbol);
    }

    pub fn insert_symbol(&mut self, qname: QName, symbol: Symbol) {
        tracing::trace!(%qname, kind = ?symbol.kind, "insert symbol");
        self.symbols.entry(qname).or_default().push(symbol);
    }

    /// Record an annotation against `qname`, independently of its records
    pub fn insert_annotation(&mut self, qname: QName, annotation: AnnotationEntry) {
        self.annotations.entry(qname).or_default().push(annotation);
    }

    /// Register a function under the file scope and under its own scope.
    ///
    /// `qname` carries the function's name leaf; its scope is ignored.
    pub fn insert_function(&mut self, qname: QName, def_node: NodeId, params: Vec<SmolStr>) {
        let signature = Signature::Function { params };
        let own = Scope::Function(qname.text.clone());
        self.insert_callable(qname, own, SymbolKind::Function, def_node, signature);
    }

    /// Register a modular model under the file scope and under its own
    /// scope, with the records its parameters resolved to.
    pub fn insert_mmodel(
        &mut self,
        qname: QName,
        def_node: NodeId,
        params: Vec<(SmolStr, Vec<Symbol>)>,
    ) {
        let signature = Signature::ModularModel { params };
        let own = Scope::ModularModel(qname.text.clone());
        self.insert_callable(qname, own, SymbolKind::ModularModel, def_node, signature);
    }

    fn insert_callable(
        &mut self,
        qname: QName,
        own_scope: Scope,
        kind: SymbolKind,
        def_node: NodeId,
        signature: Signature,
    ) {
        for scope in [Scope::File, own_scope] {
            let key = QName {
                scope,
                ..qname.clone()
            };
            self.insert(key.clone(), kind, Some(def_node), None);
            self.signatures.insert(key, signature.clone());
        }
    }

    /// All records for `qname` in insertion order; empty if unknown
    pub fn get(&self, qname: &QName) -> &[Symbol] {
        self.symbols.get(qname).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn annotations(&self, qname: &QName) -> &[AnnotationEntry] {
        self.annotations.get(qname).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn signature(&self, qname: &QName) -> Option<&Signature> {
        self.signatures.get(qname)
    }

    /// Every distinct name text across all scopes, in first-seen order
    pub fn get_all_names(&self) -> IndexSet<SmolStr> {
        self.symbols.keys().map(|qname| qname.text.clone()).collect()
    }

    /// A name that no record in the table uses, of the form
    /// `{prefix}{separator}{n}`. Successive calls with one prefix return
    /// strictly increasing `n`.
    pub fn get_unique_name(&mut self, prefix: &str) -> SmolStr {
        let taken = self.get_all_names();
        let counter = self
            .unique_counters
            .entry(SmolStr::new(prefix))
            .or_insert(0);
        loop {
            *counter += 1;
            let candidate = format_smolstr!("{prefix}{}{counter}", self.separator);
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Qualified names with their records, in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&QName, &[Symbol])> {
        self.symbols.iter().map(|(qname, symbols)| (qname, symbols.as_slice()))
    }

    /// Number of distinct qualified names
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
