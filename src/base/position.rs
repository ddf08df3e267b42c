/// Position tracking for AST nodes
///
/// Stores the source location (line/column) of AST nodes for navigation,
/// diagnostics and completion. Lines and columns are 1-based; editors that
/// count from zero convert at the boundary with [`SrcPosition::from_lsp`] and
/// [`SrcPosition::to_lsp`].
use std::fmt;

/// A position in source code (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SrcPosition {
    pub line: u32,
    pub column: u32,
}

/// A half-open range in source code: `start` is inside, `end` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SrcRange {
    pub start: SrcPosition,
    pub end: SrcPosition,
}

impl SrcPosition {
    pub fn new(line: u32, column: u32) -> Self {
        debug_assert!(line >= 1 && column >= 1, "positions are 1-based");
        Self { line, column }
    }

    /// Convert a 0-based editor position into the internal convention.
    pub fn from_lsp(line: u32, character: u32) -> Self {
        Self::new(line + 1, character + 1)
    }

    /// Convert back to a 0-based editor position `(line, character)`.
    pub fn to_lsp(self) -> (u32, u32) {
        (self.line - 1, self.column - 1)
    }
}

impl SrcRange {
    pub fn new(start: SrcPosition, end: SrcPosition) -> Self {
        Self { start, end }
    }

    /// Create a range from line/column coordinates
    pub fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: SrcPosition::new(start_line, start_col),
            end: SrcPosition::new(end_line, end_col),
        }
    }

    /// An empty range anchored at `position`.
    pub fn empty(position: SrcPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Check if a position falls within this range
    pub fn contains(&self, position: SrcPosition) -> bool {
        self.start <= position && position < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for SrcPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for SrcRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
