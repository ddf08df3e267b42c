//! Syntax and semantic diagnostics for one document.
//!
//! Syntax issues come from the error placeholders the parser left in the
//! tree and are reported as warnings. Semantic issues come from name
//! checking and are reported as errors.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::SrcRange;

// ============================================================================
// ISSUE TYPES
// ============================================================================

/// Severity level of an issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
        }
    }
}

/// What went wrong. The `Display` text is the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum IssueKind {
    #[error("unexpected token '{text}'")]
    UnexpectedToken { text: SmolStr },
    #[error("unexpected newline")]
    UnexpectedNewline,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("undefined reference '{name}'")]
    UndefinedReference { name: SmolStr },
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnexpectedToken { .. } | Self::UnexpectedNewline | Self::UnexpectedEof => {
                Severity::Warning
            }
            Self::UndefinedReference { .. } => Severity::Error,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => codes::UNEXPECTED_TOKEN,
            Self::UnexpectedNewline => codes::UNEXPECTED_NEWLINE,
            Self::UnexpectedEof => codes::UNEXPECTED_EOF,
            Self::UndefinedReference { .. } => codes::UNDEFINED_REFERENCE,
        }
    }
}

/// An issue anchored at a source range
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Issue {
    pub kind: IssueKind,
    pub range: SrcRange,
}

impl Issue {
    pub fn new(kind: IssueKind, range: SrcRange) -> Self {
        Self { kind, range }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

// ============================================================================
// ISSUE CODES
// ============================================================================

/// Stable codes for issue kinds.
///
/// - **W0001-W0099**: syntax warnings left by parser recovery
/// - **E0001-E0099**: semantic errors
pub mod codes {
    /// Token that does not fit the grammar here.
    pub const UNEXPECTED_TOKEN: &str = "W0001";
    /// Line ended before the statement was complete.
    pub const UNEXPECTED_NEWLINE: &str = "W0002";
    /// Document ended inside a construct.
    pub const UNEXPECTED_EOF: &str = "W0003";
    /// Name used in a rate law without a value.
    pub const UNDEFINED_REFERENCE: &str = "E0001";
}

// ============================================================================
// ISSUE COLLECTOR
// ============================================================================

/// Collects issues for one analysis pass, keeping warnings and errors as
/// separate streams.
#[derive(Clone, Debug, Default)]
pub struct Issues {
    warnings: Vec<Issue>,
    errors: Vec<Issue>,
    /// Lines that already carry a syntax warning
    flagged_lines: FxHashSet<u32>,
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a syntax warning unless its line already has one.
    pub fn push_syntax(&mut self, issue: Issue) {
        let line = issue.range.start.line;
        if self.flagged_lines.insert(line) {
            self.warnings.push(issue);
        } else {
            tracing::trace!(line, kind = ?issue.kind, "suppressed second syntax issue on line");
        }
    }

    pub fn push_semantic(&mut self, issue: Issue) {
        self.errors.push(issue);
    }

    pub fn warnings(&self) -> &[Issue] {
        &self.warnings
    }

    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    /// Errors first, then warnings, each in the order found
    pub fn combined(&self) -> Vec<Issue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
