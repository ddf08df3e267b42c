//! Symbol tables and diagnostics of whole documents.

use rstest::rstest;
use smol_str::SmolStr;
use stibium::ide::AntFile;
use stibium::semantic::{Scope, Signature, SymbolKind};
use stibium::{IssueKind, Severity, SrcRange};

use crate::helpers::fixtures;
use crate::helpers::symbol_assertions::*;

#[rstest]
#[case::bare_reaction(fixtures::SIMPLE_REACTION, &["k1"])]
#[case::assigned_first(fixtures::DEFINED_REACTION, &[])]
#[case::model(fixtures::MODEL_WITH_PARAMETERS, &[])]
#[case::other_model(fixtures::TWO_MODELS, &["kf"])]
// Modular model parameters carry no value of their own
#[case::module_parameter(fixtures::FUNCTION_AND_MODULE, &["S"])]
#[case::annotations(fixtures::ANNOTATED, &[])]
#[case::broken(fixtures::BROKEN_LINES, &[])]
fn test_undefined_names(#[case] source: &str, #[case] expected: &[&str]) {
    let file = AntFile::new("test.ant", source);
    assert_eq!(undefined_names(&file), expected);
}

#[test]
fn test_model_records() {
    let file = AntFile::new("test.ant", fixtures::MODEL_WITH_PARAMETERS);
    let m = model("M");
    assert_first_kind(&file, m.clone(), "S1", SymbolKind::Species);
    assert_first_kind(&file, m.clone(), "S2", SymbolKind::Species);
    assert_first_kind(&file, m.clone(), "k1", SymbolKind::Parameter);
    assert_first_kind(&file, m.clone(), "J1", SymbolKind::Reaction);

    // Declaration, reactant, then the rate-law reference
    let s1 = get_symbols(&file, m.clone(), "S1");
    assert_eq!(s1.len(), 3);
    assert!(s1[0].value_node.is_some());
    assert!(get_symbols(&file, m, "S2")[0].value_node.is_none());
    assert!(file.table().get(&key(Scope::File, "S1")).is_empty());
}

#[test]
fn test_models_are_separate_scopes() {
    let file = AntFile::new("test.ant", fixtures::TWO_MODELS);
    assert!(get_symbols(&file, model("A"), "kf")[0].value_node.is_some());
    assert!(get_symbols(&file, model("B"), "kf")[0].value_node.is_none());

    let errors = file.get_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity(), Severity::Error);
    assert_eq!(errors[0].range, SrcRange::from_coords(6, 11, 6, 13));
    assert_eq!(errors[0].message(), "undefined reference 'kf'");
}

#[test]
fn test_function_and_module_signatures() {
    let file = AntFile::new("test.ant", fixtures::FUNCTION_AND_MODULE);
    let hill = Scope::Function(SmolStr::new("hill"));
    let cell = Scope::ModularModel(SmolStr::new("Cell"));

    assert_first_kind(&file, Scope::File, "hill", SymbolKind::Function);
    assert_first_kind(&file, hill.clone(), "s", SymbolKind::Parameter);
    assert_eq!(
        file.table().signature(&key(hill, "hill")),
        Some(&Signature::Function {
            params: vec![SmolStr::new("s"), SmolStr::new("n")]
        })
    );

    assert_first_kind(&file, Scope::File, "Cell", SymbolKind::ModularModel);
    assert_first_kind(&file, cell.clone(), "c", SymbolKind::Compartment);
    let Some(Signature::ModularModel { params }) = file.table().signature(&key(cell, "Cell"))
    else {
        panic!("expected a modular model signature for Cell");
    };
    let names: Vec<&str> = params.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["S", "k"]);
    // S: parameter, declaration, reactant, rate-law reference
    let kinds: Vec<SymbolKind> = params[0].1.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SymbolKind::Parameter,
            SymbolKind::Species,
            SymbolKind::Species,
            SymbolKind::Parameter,
        ]
    );
}

#[test]
fn test_annotations_accumulate() {
    let file = AntFile::new("test.ant", fixtures::ANNOTATED);
    let records = get_symbols(&file, Scope::File, "glucose");
    let kinds: Vec<SymbolKind> = records.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SymbolKind::Species, SymbolKind::Parameter, SymbolKind::Parameter]
    );
    let keywords: Vec<&str> = file
        .table()
        .annotations(&key(Scope::File, "glucose"))
        .iter()
        .map(|a| a.keyword.as_str())
        .collect();
    assert_eq!(keywords, vec!["identity", "biological_entity_is"]);
}

#[test]
fn test_broken_lines_report_warnings_in_line_order() {
    let file = AntFile::new("test.ant", fixtures::BROKEN_LINES);
    let issues = file.get_errors();
    assert!(issues.iter().all(|i| i.severity() == Severity::Warning));
    assert_eq!(
        issues.iter().map(|i| i.kind.clone()).collect::<Vec<_>>(),
        vec![
            IssueKind::UnexpectedToken {
                text: SmolStr::new("->")
            },
            IssueKind::UnexpectedNewline,
        ]
    );
    assert_eq!(issues[0].range, SrcRange::from_coords(1, 7, 1, 9));
    assert_eq!(issues[1].range, SrcRange::from_coords(3, 5, 3, 5));
    // Statements after the broken ones are still collected
    assert_first_kind(&file, Scope::File, "C", SymbolKind::Species);
}
