//! Go-to-definition implementation.

use std::sync::Arc;

use crate::base::{SrcPosition, SrcRange};

use super::file::AntFile;

/// A range in a named document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub path: Arc<str>,
    pub range: SrcRange,
}

/// One location per record of the token under `position`, pointing at the
/// name each record was introduced with. The second value is the range of
/// the token itself.
pub fn goto(file: &AntFile, position: SrcPosition) -> (Vec<Location>, Option<SrcRange>) {
    let (symbols, range) = file.symbols_at(position);
    let path: Arc<str> = Arc::from(file.path());
    let locations = symbols
        .iter()
        .map(|symbol| Location {
            path: path.clone(),
            range: file.tree().range(symbol.def_name()),
        })
        .collect();
    (locations, range)
}
