//! Completion suggestions implementation.

use smol_str::SmolStr;

use crate::base::SrcPosition;
use crate::semantic::{QName, SymbolKind, scope_at_position};

use super::file::AntFile;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Species,
    Compartment,
    Parameter,
    Reaction,
    Function,
    Model,
    /// Name with no record in reach of the cursor
    Text,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Species => 6,     // Variable
            CompletionKind::Compartment => 7, // Class
            CompletionKind::Parameter => 21,  // Constant
            CompletionKind::Reaction => 23,   // Event
            CompletionKind::Function => 3,    // Function
            CompletionKind::Model => 9,       // Module
            CompletionKind::Text => 1,        // Text
        }
    }
}

impl From<SymbolKind> for CompletionKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Species => Self::Species,
            SymbolKind::Compartment => Self::Compartment,
            SymbolKind::Parameter => Self::Parameter,
            SymbolKind::Reaction => Self::Reaction,
            SymbolKind::Function => Self::Function,
            SymbolKind::ModularModel => Self::Model,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: SmolStr,
    pub kind: CompletionKind,
}

/// Every known name starting with the identifier typed before `position`.
///
/// Names come from all scopes; the kind is taken from the cursor's scope
/// when the name is known there, and from any scope otherwise.
pub fn completions(file: &AntFile, position: SrcPosition) -> Vec<CompletionItem> {
    let prefix = typed_prefix(file, position);
    let scope = scope_at_position(file.tree(), position);
    let table = file.table();

    file.get_all_names()
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .map(|name| {
            let local = QName::lookup(scope.clone(), name.clone());
            let kind = table
                .get(&local)
                .first()
                .or_else(|| {
                    table
                        .iter()
                        .find(|(qname, _)| qname.text == name)
                        .and_then(|(_, symbols)| symbols.first())
                })
                .map_or(CompletionKind::Text, |s| s.kind.into());
            CompletionItem { label: name, kind }
        })
        .collect()
}

/// Identifier characters directly before the cursor on its line
fn typed_prefix(file: &AntFile, position: SrcPosition) -> &str {
    let Some(offset) = file.line_index().offset(position) else {
        return "";
    };
    let before = &file.text()[..usize::from(offset)];
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
        .last()
        .map_or(before.len(), |(i, _)| i);
    &before[start..]
}
