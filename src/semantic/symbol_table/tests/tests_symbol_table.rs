#![allow(clippy::unwrap_used)]
use smol_str::SmolStr;

use crate::semantic::symbol_table::{
    AnnotationEntry, QName, Scope, Signature, Symbol, SymbolKind, SymbolTable,
};
use crate::syntax::NodeId;

fn qname(scope: Scope, text: &str, leaf: usize) -> QName {
    QName {
        scope,
        name: NodeId::new(leaf),
        text: SmolStr::new(text),
    }
}

fn model(name: &str) -> Scope {
    Scope::Model(SmolStr::new(name))
}

#[test]
fn test_insert_appends_records() {
    let mut table = SymbolTable::new();
    let key = qname(model("M"), "S1", 3);
    table.insert(key.clone(), SymbolKind::Species, None, None);
    table.insert(key.clone(), SymbolKind::Parameter, None, Some(NodeId::new(9)));

    let records = table.get(&key);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, SymbolKind::Species);
    assert_eq!(records[1].kind, SymbolKind::Parameter);
    assert_eq!(records[1].value_node, Some(NodeId::new(9)));
}

#[test]
fn test_qname_equality_ignores_occurrence() {
    let mut table = SymbolTable::new();
    table.insert(qname(model("M"), "k1", 1), SymbolKind::Parameter, None, None);

    // A different leaf with the same text and scope is the same key
    let reference = qname(model("M"), "k1", 42);
    assert_eq!(table.get(&reference).len(), 1);
    assert_eq!(table.get(&reference)[0].name, NodeId::new(1));
}

#[test]
fn test_scopes_are_distinct_keys() {
    let mut table = SymbolTable::new();
    table.insert(qname(Scope::File, "X", 1), SymbolKind::Parameter, None, None);
    table.insert(qname(model("A"), "X", 2), SymbolKind::Species, None, None);

    assert!(table.get(&qname(model("B"), "X", 0)).is_empty());
    assert_eq!(table.get(&qname(model("A"), "X", 0))[0].kind, SymbolKind::Species);
    assert_eq!(table.get(&qname(Scope::File, "X", 0))[0].kind, SymbolKind::Parameter);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_get_all_names_spans_scopes() {
    let mut table = SymbolTable::new();
    table.insert(qname(model("A"), "x", 1), SymbolKind::Parameter, None, None);
    table.insert(qname(model("B"), "y", 2), SymbolKind::Parameter, None, None);
    table.insert(qname(Scope::File, "x", 3), SymbolKind::Parameter, None, None);

    let names: Vec<_> = table.get_all_names().into_iter().collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn test_unique_names_do_not_collide() {
    let mut table = SymbolTable::new();
    table.insert(qname(Scope::File, "k_1", 1), SymbolKind::Parameter, None, None);
    table.insert(qname(model("M"), "k_3", 2), SymbolKind::Parameter, None, None);

    let first = table.get_unique_name("k");
    let second = table.get_unique_name("k");
    let third = table.get_unique_name("k");
    assert_eq!(first, "k_2");
    assert_eq!(second, "k_4");
    assert_eq!(third, "k_5");
}

#[test]
fn test_unique_name_separator() {
    let mut table = SymbolTable::with_separator(SmolStr::new("."));
    assert_eq!(table.get_unique_name("J"), "J.1");
    assert_eq!(table.get_unique_name("S"), "S.1");
}

#[test]
fn test_function_registered_in_both_scopes() {
    let mut table = SymbolTable::new();
    let name = qname(Scope::File, "f", 1);
    table.insert_function(name, NodeId::new(0), vec![SmolStr::new("a")]);

    let file = qname(Scope::File, "f", 0);
    let own = qname(Scope::Function(SmolStr::new("f")), "f", 0);
    assert_eq!(table.get(&file)[0].kind, SymbolKind::Function);
    assert_eq!(table.get(&own)[0].kind, SymbolKind::Function);
    assert_eq!(
        table.signature(&own),
        Some(&Signature::Function {
            params: vec![SmolStr::new("a")]
        })
    );
}

#[test]
fn test_mmodel_signature_keeps_resolved_params() {
    let mut table = SymbolTable::new();
    let scope = Scope::ModularModel(SmolStr::new("M"));
    let param = Symbol::new(SymbolKind::Species, NodeId::new(5));
    table.insert_mmodel(
        qname(Scope::File, "M", 1),
        NodeId::new(0),
        vec![(SmolStr::new("x"), vec![param.clone()])],
    );

    let Some(Signature::ModularModel { params }) = table.signature(&qname(scope, "M", 0)) else {
        panic!("expected a modular model signature");
    };
    assert_eq!(params[0].1, vec![param]);
}

#[test]
fn test_annotations_are_stored_apart_from_records() {
    let mut table = SymbolTable::new();
    let key = qname(Scope::File, "S1", 1);
    table.insert_annotation(
        key.clone(),
        AnnotationEntry {
            keyword: SmolStr::new("identity"),
            uri: SmolStr::new("http://example.org/S1"),
            node: NodeId::new(7),
        },
    );
    assert!(table.get(&key).is_empty());
    assert_eq!(table.annotations(&key)[0].uri, "http://example.org/S1");
}
