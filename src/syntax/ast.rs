//! Typed views over the AST arena.
//!
//! Each wrapper is a `Copy` handle holding a [`NodeId`] of one trunk kind.
//! Accessors take the owning [`AntTree`] and return child ids, so a wrapper
//! never outlives or borrows its tree.

use smol_str::SmolStr;

use super::tree::{AntTree, NodeId, NodeKind};

/// Trait for typed handles on arena nodes
pub trait TypedNode: Sized + Copy {
    fn can_cast(kind: NodeKind) -> bool;
    fn cast(tree: &AntTree, id: NodeId) -> Option<Self>;
    fn id(&self) -> NodeId;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) NodeId);

        impl TypedNode for $name {
            fn can_cast(kind: NodeKind) -> bool {
                kind == NodeKind::$kind
            }

            fn cast(tree: &AntTree, id: NodeId) -> Option<Self> {
                if Self::can_cast(tree.kind(id)) {
                    Some(Self(id))
                } else {
                    None
                }
            }

            fn id(&self) -> NodeId {
                self.0
            }
        }
    };
}

fn child_of_kind(tree: &AntTree, id: NodeId, kind: NodeKind) -> Option<NodeId> {
    tree.children(id).find(|c| tree.kind(*c) == kind)
}

fn children_of_kind(
    tree: &AntTree,
    id: NodeId,
    kind: NodeKind,
) -> impl Iterator<Item = NodeId> + '_ {
    tree.children(id).filter(move |c| tree.kind(*c) == kind)
}

fn child_cast<N: TypedNode>(tree: &AntTree, id: NodeId) -> Option<N> {
    tree.children(id).find_map(|c| N::cast(tree, c))
}

/// First arithmetic expression among the children
fn expression_child(tree: &AntTree, id: NodeId) -> Option<NodeId> {
    tree.children(id).find(|c| tree.kind(*c).is_expression())
}

// ============================================================================
// Top level
// ============================================================================

ast_node!(FileNode, File);

impl FileNode {
    pub fn root(tree: &AntTree) -> Self {
        Self(tree.root())
    }

    pub fn items<'t>(&self, tree: &'t AntTree) -> impl Iterator<Item = NodeId> + 't {
        tree.children(self.0)
    }
}

ast_node!(Model, Model);

impl Model {
    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Name)
    }

    pub fn body(&self, tree: &AntTree) -> Option<SimpleStmtList> {
        child_cast(tree, self.0)
    }
}

ast_node!(ModularModel, ModularModel);

impl ModularModel {
    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Name)
    }

    pub fn params(&self, tree: &AntTree) -> Option<Parameters> {
        child_cast(tree, self.0)
    }

    pub fn body(&self, tree: &AntTree) -> Option<SimpleStmtList> {
        child_cast(tree, self.0)
    }
}

ast_node!(Function, Function);

impl Function {
    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Name)
    }

    pub fn params(&self, tree: &AntTree) -> Option<Parameters> {
        child_cast(tree, self.0)
    }

    /// The arithmetic body between the parameter list and `end`
    pub fn body(&self, tree: &AntTree) -> Option<NodeId> {
        expression_child(tree, self.0)
    }
}

ast_node!(Parameters, Parameters);

impl Parameters {
    pub fn items<'t>(&self, tree: &'t AntTree) -> impl Iterator<Item = NodeId> + 't {
        children_of_kind(tree, self.0, NodeKind::Name)
    }
}

ast_node!(SimpleStmtList, SimpleStmtList);

impl SimpleStmtList {
    pub fn items<'t>(&self, tree: &'t AntTree) -> impl Iterator<Item = NodeId> + 't {
        tree.children(self.0)
    }

    pub fn stmts<'t>(&self, tree: &'t AntTree) -> impl Iterator<Item = SimpleStmt> + 't {
        tree.children(self.0)
            .filter_map(|c| SimpleStmt::cast(tree, c))
    }
}

ast_node!(SimpleStmt, SimpleStmt);

impl SimpleStmt {
    /// The statement before the separator; `None` for a blank line
    pub fn stmt(&self, tree: &AntTree) -> Option<Stmt> {
        tree.children(self.0).find_map(|c| Stmt::cast(tree, c))
    }
}

ast_node!(ErrorNode, ErrorNode);

impl ErrorNode {
    pub fn last_leaf(&self, tree: &AntTree) -> Option<NodeId> {
        tree.last_leaf(self.0)
    }
}

// ============================================================================
// Statements
// ============================================================================

/// Any statement that can stand inside a [`SimpleStmt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stmt {
    Reaction(Reaction),
    Assignment(Assignment),
    Declaration(Declaration),
    Annotation(Annotation),
    UnitDeclaration(UnitDeclaration),
    UnitAssignment(UnitAssignment),
}

impl TypedNode for Stmt {
    fn can_cast(kind: NodeKind) -> bool {
        matches!(
            kind,
            NodeKind::Reaction
                | NodeKind::Assignment
                | NodeKind::Declaration
                | NodeKind::Annotation
                | NodeKind::UnitDeclaration
                | NodeKind::UnitAssignment
        )
    }

    fn cast(tree: &AntTree, id: NodeId) -> Option<Self> {
        match tree.kind(id) {
            NodeKind::Reaction => Some(Self::Reaction(Reaction(id))),
            NodeKind::Assignment => Some(Self::Assignment(Assignment(id))),
            NodeKind::Declaration => Some(Self::Declaration(Declaration(id))),
            NodeKind::Annotation => Some(Self::Annotation(Annotation(id))),
            NodeKind::UnitDeclaration => Some(Self::UnitDeclaration(UnitDeclaration(id))),
            NodeKind::UnitAssignment => Some(Self::UnitAssignment(UnitAssignment(id))),
            _ => None,
        }
    }

    fn id(&self) -> NodeId {
        match self {
            Self::Reaction(n) => n.id(),
            Self::Assignment(n) => n.id(),
            Self::Declaration(n) => n.id(),
            Self::Annotation(n) => n.id(),
            Self::UnitDeclaration(n) => n.id(),
            Self::UnitAssignment(n) => n.id(),
        }
    }
}

ast_node!(Reaction, Reaction);

impl Reaction {
    /// Name leaf of `J1: ...`, if the reaction is named
    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        let name = child_cast::<ReactionName>(tree, self.0)?;
        name.maybe_in(tree)?.name(tree)
    }

    fn species_list(&self, tree: &AntTree, nth: usize) -> Option<SpeciesList> {
        children_of_kind(tree, self.0, NodeKind::SpeciesList)
            .nth(nth)
            .map(SpeciesList)
    }

    pub fn reactants(&self, tree: &AntTree) -> Vec<Species> {
        self.species_list(tree, 0)
            .map(|list| list.species(tree).collect())
            .unwrap_or_default()
    }

    pub fn products(&self, tree: &AntTree) -> Vec<Species> {
        self.species_list(tree, 1)
            .map(|list| list.species(tree).collect())
            .unwrap_or_default()
    }

    /// Expression after the `;`, absent for `A -> B;`
    pub fn rate_law(&self, tree: &AntTree) -> Option<NodeId> {
        expression_child(tree, self.0)
    }
}

ast_node!(ReactionName, ReactionName);

impl ReactionName {
    pub fn maybe_in(&self, tree: &AntTree) -> Option<MaybeIn> {
        child_cast(tree, self.0)
    }
}

ast_node!(SpeciesList, SpeciesList);

impl SpeciesList {
    pub fn species<'t>(&self, tree: &'t AntTree) -> impl Iterator<Item = Species> + 't {
        children_of_kind(tree, self.0, NodeKind::Species).map(Species)
    }
}

ast_node!(Species, Species);

impl Species {
    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Name)
    }

    /// Stoichiometry prefix such as the `2` in `2 A`
    pub fn stoichiometry(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Number)
    }

    /// Whether the species is marked boundary with `$`
    pub fn is_boundary(&self, tree: &AntTree) -> bool {
        tree.children(self.0).any(|c| tree.text(c) == Some("$"))
    }
}

ast_node!(Assignment, Assignment);

impl Assignment {
    pub fn maybe_in(&self, tree: &AntTree) -> Option<MaybeIn> {
        child_cast(tree, self.0)
    }

    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        self.maybe_in(tree)?.name(tree)
    }

    pub fn value(&self, tree: &AntTree) -> Option<NodeId> {
        expression_child(tree, self.0)
    }

    /// Unit attached by a later `x has unit` statement
    pub fn unit(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::UnitSum)
    }
}

ast_node!(Declaration, Declaration);

impl Declaration {
    pub fn modifiers(&self, tree: &AntTree) -> Option<DeclModifiers> {
        child_cast(tree, self.0)
    }

    pub fn items<'t>(&self, tree: &'t AntTree) -> impl Iterator<Item = DeclItem> + 't {
        children_of_kind(tree, self.0, NodeKind::DeclItem).map(DeclItem)
    }
}

/// `var` or `const`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variability {
    Variable,
    Constant,
}

ast_node!(DeclModifiers, DeclModifiers);

impl DeclModifiers {
    pub fn variability(&self, tree: &AntTree) -> Option<Variability> {
        let slot = tree.child_slots(self.0).first().copied().flatten()?;
        match tree.text(slot)? {
            "const" => Some(Variability::Constant),
            _ => Some(Variability::Variable),
        }
    }

    /// Text of the type modifier: `species`, `compartment` or `formula`
    pub fn type_modifier<'t>(&self, tree: &'t AntTree) -> Option<&'t str> {
        let slot = tree.child_slots(self.0).get(1).copied().flatten()?;
        tree.text(slot)
    }
}

ast_node!(DeclItem, DeclItem);

impl DeclItem {
    pub fn maybe_in(&self, tree: &AntTree) -> Option<MaybeIn> {
        child_cast(tree, self.0)
    }

    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        self.maybe_in(tree)?.name(tree)
    }

    pub fn assignment(&self, tree: &AntTree) -> Option<DeclAssignment> {
        child_cast(tree, self.0)
    }

    /// Initializer expression of `x = 1` inside a declaration
    pub fn value(&self, tree: &AntTree) -> Option<NodeId> {
        self.assignment(tree)?.value(tree)
    }
}

ast_node!(DeclAssignment, DeclAssignment);

impl DeclAssignment {
    pub fn value(&self, tree: &AntTree) -> Option<NodeId> {
        expression_child(tree, self.0)
    }

    pub fn unit(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::UnitSum)
    }
}

ast_node!(Annotation, Annotation);

impl Annotation {
    pub fn var_name(&self, tree: &AntTree) -> Option<VarName> {
        child_cast(tree, self.0)
    }

    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        self.var_name(tree)?.name(tree)
    }

    pub fn keyword(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Keyword)
    }

    pub fn uri_node(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::StringLiteral)
    }

    /// The annotation target with surrounding quotes removed
    pub fn uri(&self, tree: &AntTree) -> Option<SmolStr> {
        let text = tree.text(self.uri_node(tree)?)?;
        let inner = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text);
        Some(SmolStr::new(inner))
    }
}

ast_node!(UnitDeclaration, UnitDeclaration);

impl UnitDeclaration {
    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Name)
    }

    pub fn unit_sum(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::UnitSum)
    }
}

ast_node!(UnitAssignment, UnitAssignment);

impl UnitAssignment {
    pub fn var_name(&self, tree: &AntTree) -> Option<VarName> {
        child_cast(tree, self.0)
    }

    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        self.var_name(tree)?.name(tree)
    }

    pub fn unit_sum(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::UnitSum)
    }
}

// ============================================================================
// Names
// ============================================================================

ast_node!(MaybeIn, MaybeIn);

impl MaybeIn {
    pub fn var_name(&self, tree: &AntTree) -> Option<VarName> {
        child_cast(tree, self.0)
    }

    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        self.var_name(tree)?.name(tree)
    }

    pub fn in_comp(&self, tree: &AntTree) -> Option<InComp> {
        child_cast(tree, self.0)
    }
}

ast_node!(VarName, VarName);

impl VarName {
    pub fn name(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Name)
    }

    /// `$x` marks a constant (boundary) variable
    pub fn is_const(&self, tree: &AntTree) -> bool {
        tree.children(self.0).any(|c| tree.text(c) == Some("$"))
    }
}

ast_node!(InComp, InComp);

impl InComp {
    /// Name leaf of the compartment after `in`
    pub fn compartment(&self, tree: &AntTree) -> Option<NodeId> {
        child_of_kind(tree, self.0, NodeKind::Name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LineIndex;
    use crate::parser::parse;
    use crate::syntax::build;

    fn tree_of(input: &str) -> AntTree {
        build(&parse(input).syntax(), &LineIndex::new(input))
    }

    fn stmts(tree: &AntTree) -> Vec<Stmt> {
        tree.descendants(tree.root())
            .filter_map(|n| Stmt::cast(tree, n))
            .collect()
    }

    fn text(tree: &AntTree, id: Option<NodeId>) -> &str {
        id.and_then(|id| tree.text(id)).unwrap_or("")
    }

    #[test]
    fn test_reaction_accessors() {
        let tree = tree_of("J1: 2 A + $B -> C; k1*A\n");
        let [Stmt::Reaction(reaction)] = stmts(&tree)[..] else {
            panic!("expected one reaction");
        };
        assert_eq!(text(&tree, reaction.name(&tree)), "J1");

        let reactants = reaction.reactants(&tree);
        assert_eq!(reactants.len(), 2);
        assert_eq!(text(&tree, reactants[0].stoichiometry(&tree)), "2");
        assert!(reactants[1].is_boundary(&tree));
        assert_eq!(text(&tree, reaction.products(&tree)[0].name(&tree)), "C");

        let rate_law = reaction.rate_law(&tree).unwrap();
        assert_eq!(tree.kind(rate_law), NodeKind::Product);
    }

    #[test]
    fn test_reaction_without_rate_law() {
        let tree = tree_of("A -> ;\n");
        let [Stmt::Reaction(reaction)] = stmts(&tree)[..] else {
            panic!("expected one reaction");
        };
        assert_eq!(reaction.name(&tree), None);
        assert!(reaction.products(&tree).is_empty());
        assert_eq!(reaction.rate_law(&tree), None);
    }

    #[test]
    fn test_declaration_accessors() {
        let tree = tree_of("const species S1 in cell = 10, S2\n");
        let [Stmt::Declaration(decl)] = stmts(&tree)[..] else {
            panic!("expected one declaration");
        };
        let modifiers = decl.modifiers(&tree).unwrap();
        assert_eq!(modifiers.variability(&tree), Some(Variability::Constant));
        assert_eq!(modifiers.type_modifier(&tree), Some("species"));

        let items: Vec<_> = decl.items(&tree).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(text(&tree, items[0].name(&tree)), "S1");
        assert_eq!(text(&tree, items[0].value(&tree)), "10");
        let comp = items[0].maybe_in(&tree).unwrap().in_comp(&tree).unwrap();
        assert_eq!(text(&tree, comp.compartment(&tree)), "cell");
        assert_eq!(items[1].value(&tree), None);
    }

    #[test]
    fn test_annotation_accessors() {
        let tree = tree_of("S1 identity \"http://identifiers.org/chebi/CHEBI:17234\"\n");
        let [Stmt::Annotation(annotation)] = stmts(&tree)[..] else {
            panic!("expected one annotation");
        };
        assert_eq!(text(&tree, annotation.name(&tree)), "S1");
        assert_eq!(text(&tree, annotation.keyword(&tree)), "identity");
        assert_eq!(
            annotation.uri(&tree).as_deref(),
            Some("http://identifiers.org/chebi/CHEBI:17234")
        );
    }

    #[test]
    fn test_function_and_modular_model() {
        let tree = tree_of("function f(a, b)\n  a + b\nend\nmodel M(x)\n  x = 1\nend\n");
        let function = tree
            .children(tree.root())
            .find_map(|n| Function::cast(&tree, n))
            .unwrap();
        assert_eq!(text(&tree, function.name(&tree)), "f");
        let params: Vec<_> = function
            .params(&tree)
            .unwrap()
            .items(&tree)
            .map(|p| tree.leaf_text(p))
            .collect();
        assert_eq!(params, vec!["a", "b"]);
        assert_eq!(tree.kind(function.body(&tree).unwrap()), NodeKind::Sum);

        let model = tree
            .children(tree.root())
            .find_map(|n| ModularModel::cast(&tree, n))
            .unwrap();
        assert_eq!(text(&tree, model.name(&tree)), "M");
        assert_eq!(model.body(&tree).unwrap().stmts(&tree).count(), 1);
    }

    #[test]
    fn test_unit_statements() {
        let tree = tree_of("unit conc = mole / liter\nx has conc\n");
        let found = stmts(&tree);
        let Stmt::UnitDeclaration(decl) = found[0] else {
            panic!("expected unit declaration");
        };
        assert_eq!(text(&tree, decl.name(&tree)), "conc");
        assert!(decl.unit_sum(&tree).is_some());
        let Stmt::UnitAssignment(assign) = found[1] else {
            panic!("expected unit assignment");
        };
        assert_eq!(text(&tree, assign.name(&tree)), "x");
        assert!(assign.unit_sum(&tree).is_some());
    }

    #[test]
    fn test_blank_statement_has_no_stmt() {
        let tree = tree_of("\n");
        let stmt = tree
            .children(tree.root())
            .find_map(|n| SimpleStmt::cast(&tree, n))
            .unwrap();
        assert_eq!(stmt.stmt(&tree), None);
    }
}
