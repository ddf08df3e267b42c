//! Raw tree shape and error recovery.

use rstest::rstest;
use stibium::parser::{SyntaxKind, parse, tokenize};

use crate::helpers::fixtures;

fn error_nodes(input: &str) -> Vec<String> {
    parse(input)
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ERROR_NODE)
        .map(|n| n.text().to_string())
        .collect()
}

#[test]
fn test_every_fixture_is_lossless() {
    for source in fixtures::ALL {
        assert_eq!(&parse(source).syntax().to_string(), source);
    }
}

#[rstest]
#[case(fixtures::SIMPLE_REACTION)]
#[case(fixtures::DEFINED_REACTION)]
#[case(fixtures::MODEL_WITH_PARAMETERS)]
#[case(fixtures::TWO_MODELS)]
#[case(fixtures::FUNCTION_AND_MODULE)]
#[case(fixtures::ANNOTATED)]
fn test_valid_fixtures_parse_cleanly(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors);
    assert!(error_nodes(source).is_empty());
}

#[test]
fn test_tokens_cover_input() {
    let source = fixtures::MODEL_WITH_PARAMETERS;
    let joined: String = tokenize(source).iter().map(|t| t.text).collect();
    assert_eq!(joined, source);
}

#[test]
fn test_broken_lines_do_not_hide_later_statements() {
    let parse = parse(fixtures::BROKEN_LINES);
    assert!(!parse.ok());
    let stmts = parse
        .syntax()
        .descendants()
        .filter(|n| matches!(n.kind(), SyntaxKind::ASSIGNMENT | SyntaxKind::REACTION))
        .count();
    // `k = 1` and `B -> C; k` survive
    assert_eq!(stmts, 2);
}

#[test]
fn test_unclosed_model_leaves_error_at_end() {
    let source = "model M\n  k = 1\n";
    let parse = parse(source);
    assert!(!parse.ok());
    assert_eq!(parse.errors[0].message, "unexpected end of input");
    // The final newline is moved into the placeholder
    assert_eq!(error_nodes(source), vec!["\n"]);
}

#[test]
fn test_unclosed_model_keeps_completed_statement() {
    let source = "model M\n  A -> B; k1*k2";
    let parse = parse(source);
    assert_eq!(parse.syntax().to_string(), source);
    assert_eq!(parse.errors[0].message, "unexpected end of input");
    // Nothing to move, so the placeholder is empty
    assert_eq!(error_nodes(source), vec![""]);
}
