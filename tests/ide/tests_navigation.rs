//! Navigation queries on whole documents.

use rstest::rstest;
use stibium::ide::{AntFile, CompletionKind};
use stibium::semantic::SymbolKind;
use stibium::{SrcPosition, SrcRange};

use crate::helpers::fixtures;

#[rstest]
#[case::reaction_name(4, 3, SymbolKind::Reaction)]
#[case::reactant(4, 7, SymbolKind::Species)]
#[case::rate_law(4, 17, SymbolKind::Parameter)]
fn test_symbols_at_first_kind(
    #[case] line: u32,
    #[case] column: u32,
    #[case] expected: SymbolKind,
) {
    let file = AntFile::new("test.ant", fixtures::MODEL_WITH_PARAMETERS);
    let (symbols, range) = file.symbols_at(SrcPosition::new(line, column));
    assert!(range.is_some());
    assert_eq!(symbols.first().map(|s| s.kind), Some(expected));
}

#[test]
fn test_goto_from_rate_law_to_assignment() {
    let file = AntFile::new("file:///m.ant", fixtures::MODEL_WITH_PARAMETERS);
    // `k1` in `k1*S1`
    let (locations, range) = file.goto(SrcPosition::new(4, 17));
    assert_eq!(range, Some(SrcRange::from_coords(4, 17, 4, 19)));
    assert_eq!(
        locations.first().map(|l| l.range),
        Some(SrcRange::from_coords(3, 3, 3, 5))
    );
}

#[test]
fn test_goto_stays_inside_model() {
    let file = AntFile::new("test.ant", fixtures::TWO_MODELS);
    // `kf` in model B only has its own rate-law record
    let (locations, _) = file.goto(SrcPosition::new(6, 11));
    assert_eq!(
        locations.iter().map(|l| l.range).collect::<Vec<_>>(),
        vec![SrcRange::from_coords(6, 11, 6, 13)]
    );
}

#[test]
fn test_hover_shows_declared_value() {
    let file = AntFile::new("test.ant", fixtures::MODEL_WITH_PARAMETERS);
    let hover = file.hover(SrcPosition::new(2, 11)).unwrap();
    assert_eq!(hover.contents, "```\n(species) S1\nS1 = 10\n```");
    assert_eq!(hover.range, SrcRange::from_coords(2, 11, 2, 13));
}

#[test]
fn test_hover_lists_annotations() {
    let file = AntFile::new("test.ant", fixtures::ANNOTATED);
    let hover = file.hover(SrcPosition::new(1, 9)).unwrap();
    assert!(hover.contents.starts_with("```\n(species) glucose\nglucose = 5\n```"));
    assert!(hover.contents.contains("- identity <http://identifiers.org/chebi/CHEBI:17234>"));
    assert!(
        hover
            .contents
            .contains("- biological_entity_is <http://identifiers.org/go/GO:0005575>")
    );
}

#[test]
fn test_completion_across_models() {
    let source = "model A\n  kf = 1\nend\nmodel B\n  X -> Y; k\nend\n";
    let file = AntFile::new("test.ant", source);
    let items = file.completions(SrcPosition::new(5, 12));
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["kf", "k"]);
    assert!(items.iter().all(|i| i.kind == CompletionKind::Parameter));
}

#[test]
fn test_unique_names_skip_document_names() {
    let mut file = AntFile::new("test.ant", "J_1: A -> B; k\nJ_2: B -> C; k\n");
    assert_eq!(file.get_unique_name("J"), "J_3");
    assert_eq!(file.get_unique_name("J"), "J_4");
}
