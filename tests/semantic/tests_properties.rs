//! Properties that hold for every document.

use rstest::rstest;
use rustc_hash::FxHashSet;
use stibium::SrcRange;
use stibium::ide::AntFile;
use stibium::semantic::{QName, SymbolKind, scope_at_position};
use stibium::syntax::{NodeKind, Reaction, TypedNode};

use crate::helpers::fixtures;

const EXTRA_BROKEN: &[&str] = &[
    "model M\n  S1 -> -> ; k\n  k = = 2\nend\n",
    "function f(a\n  a\nend\n",
    "J1: ; ; ;\n$ $ $\nmodel\n",
];

fn all_sources() -> impl Iterator<Item = &'static str> {
    fixtures::ALL.iter().chain(EXTRA_BROKEN).copied()
}

#[test]
fn test_every_recorded_name_resolves_back() {
    for source in all_sources() {
        let file = AntFile::new("test.ant", source);
        for (qname, symbols) in file.table().iter() {
            for symbol in symbols {
                let start = file.tree().range(symbol.name).start;
                let resolved = file
                    .resolve(start)
                    .unwrap_or_else(|| panic!("{qname} at {start} did not resolve"));
                assert_eq!(resolved.text, qname.text, "in {source:?}");
                assert!(!file.table().get(&resolved).is_empty());
            }
        }
    }
}

/// Undefined rate-law references, computed from the tree and table
/// without the checker.
fn recompute_undefined(file: &AntFile) -> Vec<(String, SrcRange)> {
    let tree = file.tree();
    let mut undefined = Vec::new();
    for id in tree.descendants(tree.root()) {
        let Some(rate_law) = Reaction::cast(tree, id).and_then(|r| r.rate_law(tree)) else {
            continue;
        };
        let scope = scope_at_position(tree, tree.range(id).start);
        for (index, leaf) in tree.leaves(rate_law).enumerate() {
            if index % 2 != 0 || tree.kind(leaf) != NodeKind::Name {
                continue;
            }
            let qname = QName::new(scope.clone(), tree, leaf);
            let defined = file
                .table()
                .get(&qname)
                .first()
                .is_some_and(|s| s.value_node.is_some() || s.kind == SymbolKind::Species);
            if !defined {
                undefined.push((qname.text.to_string(), tree.range(leaf)));
            }
        }
    }
    undefined
}

#[test]
fn test_errors_match_recomputed_undefined_set() {
    for source in all_sources() {
        let file = AntFile::new("test.ant", source);
        let reported: Vec<(String, SrcRange)> = file
            .get_errors()
            .into_iter()
            .filter_map(|issue| match issue.kind {
                stibium::IssueKind::UndefinedReference { name } => {
                    Some((name.to_string(), issue.range))
                }
                _ => None,
            })
            .collect();
        assert_eq!(reported, recompute_undefined(&file), "in {source:?}");
    }
}

#[test]
fn test_analysis_is_deterministic() {
    for source in all_sources() {
        let first = AntFile::new("test.ant", source);
        let second = AntFile::new("test.ant", source);
        assert_eq!(first.get_errors(), second.get_errors());
        assert_eq!(first.get_all_names(), second.get_all_names());
        let keys = |file: &AntFile| -> Vec<String> {
            file.table().iter().map(|(q, _)| q.to_string()).collect()
        };
        assert_eq!(keys(&first), keys(&second));
    }
}

#[rstest]
#[case(fixtures::BROKEN_LINES)]
#[case(EXTRA_BROKEN[0])]
#[case(EXTRA_BROKEN[1])]
#[case(EXTRA_BROKEN[2])]
fn test_at_most_one_syntax_issue_per_line(#[case] source: &str) {
    let file = AntFile::new("test.ant", source);
    let warnings: Vec<_> = file
        .get_errors()
        .into_iter()
        .filter(|i| i.severity() == stibium::Severity::Warning)
        .collect();
    assert!(!warnings.is_empty());
    let mut lines = FxHashSet::default();
    for warning in &warnings {
        assert!(
            lines.insert(warning.range.start.line),
            "second warning on line {}",
            warning.range.start.line
        );
    }
}

#[test]
fn test_errors_precede_warnings() {
    let file = AntFile::new("test.ant", "A -> ->\nS1 -> S2; k\n");
    let severities: Vec<_> = file.get_errors().iter().map(|i| i.severity()).collect();
    assert_eq!(
        severities,
        vec![stibium::Severity::Error, stibium::Severity::Warning]
    );
}
