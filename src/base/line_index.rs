//! Byte offset → line/column conversion.

use text_size::{TextRange, TextSize};

use super::position::{SrcPosition, SrcRange};

/// Line start table for one source text.
///
/// Columns are counted in characters, so a multi-byte character advances the
/// column by one.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the first character of each line
    line_starts: Vec<TextSize>,
    text: Box<str>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            text: text.into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a 1-based position.
    pub fn position(&self, offset: TextSize) -> SrcPosition {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let end = usize::from(offset).min(self.text.len());
        let column = self.text[start..end].chars().count();
        SrcPosition::new(line as u32 + 1, column as u32 + 1)
    }

    pub fn range(&self, range: TextRange) -> SrcRange {
        SrcRange::new(self.position(range.start()), self.position(range.end()))
    }

    /// Byte offset of a 1-based position; `None` past the end of its line
    /// or of the text.
    pub fn offset(&self, position: SrcPosition) -> Option<TextSize> {
        let line = usize::try_from(position.line.checked_sub(1)?).ok()?;
        let start = usize::from(*self.line_starts.get(line)?);
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| usize::from(*next));
        let column = usize::try_from(position.column.checked_sub(1)?).ok()?;
        let line_text = &self.text[start..end];
        let byte = if column == line_text.chars().count() {
            line_text.len()
        } else {
            line_text.char_indices().nth(column)?.0
        };
        Some(TextSize::new((start + byte) as u32))
    }
}
