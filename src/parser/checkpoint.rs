//! Restore points for error recovery.
//!
//! After every completed grammar rule the parser asks [`is_checkpoint`]
//! whether the state it is in is a safe place to resume from after a later
//! syntax error. Recovery then rewinds to the last saved [`Checkpoint`],
//! turns everything consumed since into an error node, and resumes lexing at
//! the next statement boundary.

use super::syntax_kind::SyntaxKind;

/// Whether a just-completed rule of `kind` leaves the parser in a state that
/// is safe to restore after a later error.
///
/// Completed statements (reaction, assignment, declaration, annotation) and a
/// closed `model ... end` block qualify; nothing else does. The recovery
/// strategy depends on this classification, so changing it changes which
/// statements survive a nearby syntax error.
pub fn is_checkpoint(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::REACTION
            | SyntaxKind::ASSIGNMENT
            | SyntaxKind::DECLARATION
            | SyntaxKind::ANNOTATION
            | SyntaxKind::MODEL
    )
}

/// Saved parser state: only the cursor and the length of the event buffer,
/// never the tree built so far. Restoring truncates the buffer back to
/// `events` and re-reads tokens from `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub(crate) pos: usize,
    pub(crate) events: usize,
}
