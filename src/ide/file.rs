//! One analyzed version of an Antimony document.

use std::sync::Arc;

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::base::{LineIndex, SrcPosition, SrcRange};
use crate::parser::{SyntaxKind, is_checkpoint, parse};
use crate::semantic::{
    Analysis, AnalysisOptions, Issue, QName, Symbol, SymbolTable, analyze, qname_at_position,
};
use crate::syntax::{AntTree, build};

use super::completion::{CompletionItem, completions};
use super::goto::{Location, goto};
use super::hover::{HoverResult, hover};

/// Source text, typed tree and analysis of one document version.
///
/// Built in one go by [`AntFile::new`] and never patched afterwards: an
/// edit produces a fresh `AntFile`.
#[derive(Debug, Clone)]
pub struct AntFile {
    path: Arc<str>,
    text: Arc<str>,
    line_index: LineIndex,
    tree: AntTree,
    analysis: Analysis,
    /// Recoveries the parser made
    parse_errors: usize,
}

impl AntFile {
    pub fn new(path: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self::with_options(path, text, &AnalysisOptions::default())
    }

    pub fn with_options(
        path: impl Into<Arc<str>>,
        text: impl Into<Arc<str>>,
        options: &AnalysisOptions,
    ) -> Self {
        let path = path.into();
        let text: Arc<str> = text.into();
        let parse = parse(&text);
        let line_index = LineIndex::new(&text);
        let mut tree = build(&parse.syntax(), &line_index);
        let analysis = analyze(&mut tree, options);
        tracing::debug!(%path, parse_errors = parse.errors.len(), "analyzed document");
        Self {
            path,
            text,
            line_index,
            tree,
            analysis,
            parse_errors: parse.errors.len(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &AntTree {
        &self.tree
    }

    pub fn table(&self) -> &SymbolTable {
        &self.analysis.table
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn parse_error_count(&self) -> usize {
        self.parse_errors
    }

    /// Qualified name of the token under `position`
    pub fn resolve(&self, position: SrcPosition) -> Option<QName> {
        qname_at_position(&self.tree, position)
    }

    /// Records the token under `position` may refer to, with the token's
    /// range. Both are empty when no token is there.
    pub fn symbols_at(&self, position: SrcPosition) -> (Vec<Symbol>, Option<SrcRange>) {
        match self.resolve(position) {
            Some(qname) => (
                self.table().get(&qname).to_vec(),
                Some(self.tree.range(qname.name)),
            ),
            None => (Vec::new(), None),
        }
    }

    /// Definition sites for the token under `position`
    pub fn goto(&self, position: SrcPosition) -> (Vec<Location>, Option<SrcRange>) {
        goto(self, position)
    }

    pub fn hover(&self, position: SrcPosition) -> Option<HoverResult> {
        hover(self, position)
    }

    pub fn completions(&self, position: SrcPosition) -> Vec<CompletionItem> {
        completions(self, position)
    }

    /// Errors first, then warnings
    pub fn get_errors(&self) -> Vec<Issue> {
        self.analysis.issues.combined()
    }

    pub fn get_all_names(&self) -> IndexSet<SmolStr> {
        self.table().get_all_names()
    }

    pub fn get_unique_name(&mut self, prefix: &str) -> SmolStr {
        self.analysis.table.get_unique_name(prefix)
    }

    /// Whether a just-completed rule of `kind` is a safe parser restore point
    pub fn save_checkpoint(&self, kind: SyntaxKind) -> bool {
        is_checkpoint(kind)
    }
}
