//! Symbol table assertion helpers.

use smol_str::SmolStr;
use stibium::ide::AntFile;
use stibium::semantic::{QName, Scope, Symbol, SymbolKind};

pub fn key(scope: Scope, name: &str) -> QName {
    QName::lookup(scope, name)
}

pub fn model(name: &str) -> Scope {
    Scope::Model(SmolStr::new(name))
}

/// Records for `name` in `scope`, failing when there are none.
pub fn get_symbols<'a>(file: &'a AntFile, scope: Scope, name: &str) -> &'a [Symbol] {
    let records = file.table().get(&key(scope.clone(), name));
    assert!(
        !records.is_empty(),
        "Expected '{}' to have records in scope {}",
        name,
        scope
    );
    records
}

/// Assert the first record of `name` in `scope` has the expected kind.
pub fn assert_first_kind(file: &AntFile, scope: Scope, name: &str, expected: SymbolKind) {
    let first = &get_symbols(file, scope.clone(), name)[0];
    assert_eq!(
        first.kind, expected,
        "Expected '{}::{}' to be {:?}, got {:?}",
        scope, name, expected, first.kind
    );
}

/// Names flagged as undefined, in report order.
pub fn undefined_names(file: &AntFile) -> Vec<String> {
    file.get_errors()
        .into_iter()
        .filter_map(|issue| match issue.kind {
            stibium::IssueKind::UndefinedReference { name } => Some(name.to_string()),
            _ => None,
        })
        .collect()
}
