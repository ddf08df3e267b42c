//! Symbol collection.
//!
//! [`analyze`] is the single entry point: it walks the file once to fill a
//! [`SymbolTable`], applies the unit splices that walk asked for, and then
//! runs the issue pass in [`super::check`].

use smol_str::SmolStr;

use super::check::check_tree;
use super::issues::Issues;
use super::options::AnalysisOptions;
use super::symbol_table::{AnnotationEntry, QName, Scope, Symbol, SymbolKind, SymbolTable};
use crate::syntax::{
    Annotation, AntTree, Assignment, Declaration, FileNode, Function, InComp, ModularModel,
    NodeId, NodeKind, Reaction, SimpleStmtList, Stmt, TypedNode, UnitAssignment,
    UnitDeclaration,
};

/// Everything known about one document version
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: SymbolTable,
    pub issues: Issues,
}

/// Populate a symbol table for `tree` and collect its issues.
///
/// `tree` is borrowed mutably only to attach units from `x has unit`
/// statements to the node that gave `x` its value.
pub fn analyze(tree: &mut AntTree, options: &AnalysisOptions) -> Analysis {
    let (table, splices) = {
        let mut collector = SymbolCollector::new(tree, options);
        collector.collect();
        (collector.table, collector.splices)
    };

    for (target, unit) in splices {
        tracing::trace!(?target, ?unit, "splicing unit");
        tree.splice_unit(target, unit);
    }

    let issues = check_tree(tree, &table, options);
    tracing::debug!(
        names = table.len(),
        errors = issues.errors().len(),
        warnings = issues.warnings().len(),
        "analysis finished"
    );
    Analysis { table, issues }
}

struct SymbolCollector<'t> {
    tree: &'t AntTree,
    table: SymbolTable,
    /// `(value node, unit)` pairs applied once the walk is done
    splices: Vec<(NodeId, NodeId)>,
}

impl<'t> SymbolCollector<'t> {
    fn new(tree: &'t AntTree, options: &AnalysisOptions) -> Self {
        Self {
            tree,
            table: SymbolTable::with_separator(options.unique_name_separator.clone()),
            splices: Vec::new(),
        }
    }

    fn qname(&self, scope: &Scope, leaf: NodeId) -> QName {
        QName::new(scope.clone(), self.tree, leaf)
    }

    fn collect(&mut self) {
        let tree = self.tree;
        for item in FileNode::root(tree).items(tree) {
            match tree.kind(item) {
                // Error placeholders contribute no symbols
                NodeKind::ErrorNode | NodeKind::ErrorToken => {}
                NodeKind::Model => {
                    let Some(scope) = Scope::of_marker(tree, item) else {
                        continue;
                    };
                    self.collect_model_body(&scope, item);
                }
                NodeKind::ModularModel => self.handle_mmodel(ModularModel(item)),
                NodeKind::Function => self.handle_function(Function(item)),
                NodeKind::SimpleStmt => {
                    self.collect_stmts(&Scope::File, item);
                }
                _ => {}
            }
        }
    }

    fn collect_model_body(&mut self, scope: &Scope, model: NodeId) {
        let tree = self.tree;
        let lists: Vec<_> = tree
            .children(model)
            .filter_map(|c| SimpleStmtList::cast(tree, c))
            .collect();
        for list in lists {
            for stmt in list.stmts(tree) {
                self.collect_stmts(scope, stmt.id());
            }
        }
    }

    /// Dispatch the statement inside a `SimpleStmt`, if any
    fn collect_stmts(&mut self, scope: &Scope, simple_stmt: NodeId) {
        let tree = self.tree;
        let Some(stmt) = tree.children(simple_stmt).find_map(|c| Stmt::cast(tree, c)) else {
            return;
        };
        match stmt {
            Stmt::Reaction(reaction) => self.handle_reaction(scope, reaction),
            Stmt::Assignment(assignment) => self.handle_assignment(scope, assignment),
            Stmt::Declaration(declaration) => self.handle_declaration(scope, declaration),
            Stmt::Annotation(annotation) => self.handle_annotation(scope, annotation),
            Stmt::UnitDeclaration(unit) => self.handle_unit_declaration(scope, unit),
            Stmt::UnitAssignment(unit) => self.handle_unit_assignment(scope, unit),
        }
        self.handle_child_incomp(scope, stmt.id());
    }

    // =========================================================================
    // Statement handlers
    // =========================================================================

    fn handle_reaction(&mut self, scope: &Scope, reaction: Reaction) {
        let tree = self.tree;
        if let Some(name) = reaction.name(tree) {
            let qname = self.qname(scope, name);
            self.table
                .insert(qname, SymbolKind::Reaction, Some(reaction.id()), None);
        }
        let species = reaction
            .reactants(tree)
            .into_iter()
            .chain(reaction.products(tree));
        for species in species {
            if let Some(name) = species.name(tree) {
                let qname = self.qname(scope, name);
                self.table.insert(qname, SymbolKind::Species, None, None);
            }
        }
        if let Some(rate_law) = reaction.rate_law(tree) {
            self.handle_arith_expr(scope, rate_law);
        }
    }

    fn handle_assignment(&mut self, scope: &Scope, assignment: Assignment) {
        let tree = self.tree;
        if let Some(name) = assignment.name(tree) {
            let qname = self.qname(scope, name);
            self.table.insert(
                qname,
                SymbolKind::Parameter,
                Some(assignment.id()),
                Some(assignment.id()),
            );
        }
        if let Some(value) = assignment.value(tree) {
            self.handle_arith_expr(scope, value);
        }
    }

    fn handle_declaration(&mut self, scope: &Scope, declaration: Declaration) {
        let tree = self.tree;
        let kind = declaration
            .modifiers(tree)
            .and_then(|m| m.type_modifier(tree))
            .map_or(SymbolKind::Parameter, |modifier| match modifier {
                "species" => SymbolKind::Species,
                "compartment" => SymbolKind::Compartment,
                _ => SymbolKind::Parameter,
            });

        for item in declaration.items(tree) {
            let Some(name) = item.name(tree) else {
                continue;
            };
            let value = item.value(tree);
            // The item is the value node only when it carries an initializer
            let value_node = value.map(|_| item.id());
            let qname = self.qname(scope, name);
            self.table
                .insert(qname, kind, Some(declaration.id()), value_node);
            if let Some(value) = value {
                self.handle_arith_expr(scope, value);
            }
        }
    }

    fn handle_annotation(&mut self, scope: &Scope, annotation: Annotation) {
        let tree = self.tree;
        let Some(name) = annotation.name(tree) else {
            return;
        };
        let entry = AnnotationEntry {
            keyword: annotation
                .keyword(tree)
                .map(|k| tree.leaf_text(k))
                .unwrap_or_default(),
            uri: annotation.uri(tree).unwrap_or_default(),
            node: annotation.id(),
        };
        let qname = self.qname(scope, name);
        // Parameter is a placeholder role: an existing declaration of the
        // name keeps its own record ahead of this one.
        let symbol = Symbol::new(SymbolKind::Parameter, name)
            .with_def(annotation.id())
            .with_annotation(entry.clone());
        self.table.insert_symbol(qname.clone(), symbol);
        self.table.insert_annotation(qname, entry);
    }

    fn handle_unit_declaration(&mut self, _scope: &Scope, unit: UnitDeclaration) {
        // Units are parsed but not tracked as symbols yet
        tracing::trace!(unit = ?unit.name(self.tree), "skipping unit declaration");
    }

    fn handle_unit_assignment(&mut self, scope: &Scope, unit: UnitAssignment) {
        let tree = self.tree;
        let (Some(name), Some(unit_sum)) = (unit.name(tree), unit.unit_sum(tree)) else {
            return;
        };
        let qname = self.qname(scope, name);
        let Some(value_node) = self.table.get(&qname).first().and_then(|s| s.value_node) else {
            return;
        };
        let target = match tree.kind(value_node) {
            NodeKind::Assignment => Some(value_node),
            NodeKind::DeclItem => tree
                .children(value_node)
                .find(|c| tree.kind(*c) == NodeKind::DeclAssignment),
            _ => None,
        };
        if let Some(target) = target {
            self.splices.push((target, unit_sum));
        }
    }

    /// Every `in comp` below `node` names a compartment
    fn handle_child_incomp(&mut self, scope: &Scope, node: NodeId) {
        let tree = self.tree;
        let compartments: Vec<_> = tree
            .descendants(node)
            .filter_map(|n| InComp::cast(tree, n))
            .filter_map(|in_comp| in_comp.compartment(tree))
            .collect();
        for name in compartments {
            let qname = self.qname(scope, name);
            self.table.insert(qname, SymbolKind::Compartment, None, None);
        }
    }

    /// Every name in an arithmetic expression is at least a parameter
    fn handle_arith_expr(&mut self, scope: &Scope, expr: NodeId) {
        let tree = self.tree;
        let names: Vec<_> = tree
            .leaves(expr)
            .filter(|leaf| tree.kind(*leaf) == NodeKind::Name)
            .collect();
        for name in names {
            let qname = self.qname(scope, name);
            self.table.insert(qname, SymbolKind::Parameter, None, None);
        }
    }

    // =========================================================================
    // Functions and modular models
    // =========================================================================

    fn handle_parameters(&mut self, scope: &Scope, params: &[NodeId]) {
        for param in params {
            let qname = self.qname(scope, *param);
            self.table.insert(qname, SymbolKind::Parameter, None, None);
        }
    }

    fn handle_function(&mut self, function: Function) {
        let tree = self.tree;
        let (Some(name), Some(scope)) = (function.name(tree), Scope::of_marker(tree, function.id()))
        else {
            return;
        };
        let params: Vec<NodeId> = function
            .params(tree)
            .map(|p| p.items(tree).collect())
            .unwrap_or_default();
        let param_names: Vec<SmolStr> = params.iter().map(|p| tree.leaf_text(*p)).collect();

        let qname = self.qname(&Scope::File, name);
        self.table.insert_function(qname, function.id(), param_names);
        self.handle_parameters(&scope, &params);
        if let Some(body) = function.body(tree) {
            self.handle_arith_expr(&scope, body);
        }
    }

    fn handle_mmodel(&mut self, mmodel: ModularModel) {
        let tree = self.tree;
        let (Some(name), Some(scope)) = (mmodel.name(tree), Scope::of_marker(tree, mmodel.id()))
        else {
            return;
        };
        let params: Vec<NodeId> = mmodel
            .params(tree)
            .map(|p| p.items(tree).collect())
            .unwrap_or_default();
        self.handle_parameters(&scope, &params);
        self.collect_model_body(&scope, mmodel.id());

        // Resolve parameters after the body so they see its declarations
        let signature = params
            .iter()
            .map(|param| {
                let qname = self.qname(&scope, *param);
                (qname.text.clone(), self.table.get(&qname).to_vec())
            })
            .collect();
        let qname = self.qname(&Scope::File, name);
        self.table.insert_mmodel(qname, mmodel.id(), signature);
    }
}
